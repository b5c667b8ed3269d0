// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod playlist;
pub mod storage;
pub mod track;

pub type Error = setlist_usecases_sqlite::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Detect [`setlist_repo::prelude::RepoError::NotFound`] after the
/// error has been converted into an [`anyhow::Error`].
///
/// All causes are inspected, including errors that are only reachable
/// through [`std::error::Error::source`].
#[must_use]
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.downcast_ref::<Error>().is_some_and(Error::is_not_found)
            || cause
                .downcast_ref::<setlist_repo::prelude::RepoError>()
                .is_some_and(setlist_repo::prelude::RepoError::is_not_found)
    })
}

pub mod prelude {
    pub use setlist_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

    pub use super::{Error, Result};
}
