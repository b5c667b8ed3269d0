// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{borrow::Cow, path::PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

const IN_MEMORY_STORAGE: &str = ":memory:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Storage {
    /// Volatile, private database
    ///
    /// Only a single connection is able to access the database.
    #[default]
    InMemory,

    File {
        path: PathBuf,
    },
}

impl Storage {
    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    #[must_use]
    pub fn connection_string(&self) -> Cow<'_, str> {
        match self {
            Self::InMemory => Cow::Borrowed(IN_MEMORY_STORAGE),
            Self::File { path } => path.to_string_lossy(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub storage: Storage,
    pub pool: pool::Config,
}
