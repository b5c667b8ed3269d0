// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_repo_sqlite::{DbConnection, initialize_database, run_migrations};

use super::*;

pub fn initialize(connection: &mut DbConnection) -> Result<()> {
    initialize_database(connection)?;
    Ok(())
}

pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    for migration_version in run_migrations(connection)
        .map_err(|err| anyhow::anyhow!(err))
        .map_err(Error::DatabaseMigration)?
    {
        log::info!("Applied migration '{migration_version}'");
    }
    Ok(())
}

pub fn cleanse(connection: &mut DbConnection, vacuum: bool) -> Result<()> {
    setlist_storage_sqlite::cleanse_database(connection, vacuum)?;
    Ok(())
}
