// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordered playlist persistence
//!
//! Facade of the workspace crates. Everything beyond the domain model
//! is opt-in through features.

pub use setlist_core::*;

#[cfg(feature = "repo")]
pub use setlist_repo as repo;

#[cfg(feature = "usecases")]
pub use setlist_usecases as usecases;

#[cfg(feature = "sqlite")]
pub use setlist_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use setlist_storage_sqlite as storage_sqlite;

#[cfg(feature = "sqlite")]
pub use setlist_usecases_sqlite as usecases_sqlite;

#[cfg(feature = "backend-embedded")]
pub use setlist_backend_embedded as backend_embedded;
