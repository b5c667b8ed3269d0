// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

use setlist_repo::prelude::RepoError;
use setlist_repo_sqlite::prelude::{Connection as RepoConnection, DieselTransactionError};
use setlist_storage_sqlite::Error as StorageError;
use setlist_usecases as uc;

pub mod database;
pub mod playlist;
pub mod track;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(anyhow::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepoError::NotFound))
    }
}

impl<E> From<DieselTransactionError<E>> for Error
where
    E: Into<Error>,
{
    fn from(err: DieselTransactionError<E>) -> Self {
        err.into_inner().into()
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        #[allow(clippy::enum_glob_use)]
        use uc::Error::*;
        match err {
            Input(uc::InputError(err)) => Self::Input(err),
            Repository(err) => Self::Repository(err),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::InputError> for Error {
    fn from(err: uc::InputError) -> Self {
        let uc::InputError(err) = err;
        Self::Input(err)
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.into())
    }
}

/// Carries [`Error`] through [`diesel::Connection::transaction`]
pub type TransactionError = DieselTransactionError<Error>;

pub type Result<T> = std::result::Result<T, Error>;
