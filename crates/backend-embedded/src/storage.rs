// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use setlist_storage_sqlite::connection::{
    Config as ConnectionConfig,
    pool::{create_connection_pool, gatekeeper::Gatekeeper, get_pooled_connection},
};

use crate::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatabaseConfig {
    pub connection: ConnectionConfig,
    pub migrate_schema: bool,
}

pub fn commission_database(config: &DatabaseConfig) -> anyhow::Result<Gatekeeper> {
    log::info!(
        "Creating SQLite connection pool of max. size {} for {}",
        config.connection.pool.max_size,
        config.connection.storage.connection_string(),
    );
    let connection_pool =
        create_connection_pool(&config.connection.storage, config.connection.pool.max_size)?;

    let mut connection = get_pooled_connection(&connection_pool)?;
    log::info!("Initializing database");
    setlist_usecases_sqlite::database::initialize(&mut connection)?;
    if config.migrate_schema {
        log::info!("Migrating database schema");
        setlist_usecases_sqlite::database::migrate_schema(&mut connection)?;
    }
    // Return the connection to the pool before handing it over
    drop(connection);

    let gatekeeper = Gatekeeper::new(connection_pool, config.connection.pool.gatekeeper);

    Ok(gatekeeper)
}

/// Rebuild the storage (optional) and update the query planner statistics
pub async fn cleanse_database(db_gatekeeper: &Gatekeeper, vacuum: bool) -> Result<()> {
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            setlist_usecases_sqlite::database::cleanse(&mut pooled_connection, vacuum)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
