// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use setlist::{
    backend_embedded::storage::DatabaseConfig,
    storage_sqlite::connection::{Config as DatabaseConnectionConfig, Storage},
};

const DEFAULT_DATABASE_FILE_NAME: &str = "setlist.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                connection: DatabaseConnectionConfig {
                    // An in-memory database would not survive a single command
                    storage: Storage::File {
                        path: DEFAULT_DATABASE_FILE_NAME.into(),
                    },
                    pool: Default::default(),
                },
                migrate_schema: true,
            },
        }
    }
}

impl Config {
    pub(crate) fn parse_ron(input: &str) -> anyhow::Result<Self> {
        ron::from_str(input).map_err(Into::into)
    }

    pub(crate) fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        log::info!("Loading configuration from file: {}", file_path.display());
        let input = fs::read_to_string(file_path)?;
        Self::parse_ron(&input)
    }
}
