// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::NonZeroU32, time::Duration};

use diesel::{
    Connection as _, SqliteConnection,
    connection::SimpleConnection as _,
    r2d2::{self, CustomizeConnection},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

use super::Storage;

pub type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[cfg(feature = "tokio")]
pub mod gatekeeper;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings that SQLite only applies per connection and that
/// must therefore be repeated for every pooled connection.
#[derive(Debug)]
struct ConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        connection
            .batch_execute(&format!(
                "PRAGMA foreign_keys = 1; PRAGMA busy_timeout = {};",
                BUSY_TIMEOUT.as_millis()
            ))
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection_string = storage.connection_string();
    // Establish a test connection before creating the connection pool to fail early.
    // If the given file is inaccessible r2d2 seems to do multiple retries
    // and logs errors instead of simply failing and returning and error immediately.
    std::mem::drop(SqliteConnection::establish(&connection_string)?);
    // The test connection is dropped immediately without using it
    // and missing files should have been created after reaching
    // this point.
    let manager = ConnectionManager::new(connection_string);
    let builder = ConnectionPool::builder().connection_customizer(Box::new(ConnectionCustomizer));
    let pool = if storage.is_in_memory() {
        if max_size.get() > 1 {
            log::warn!(
                "Limiting the connection pool for an in-memory database to a single connection"
            );
        }
        // Every connection opens its own, private in-memory database
        // that must never be closed and replaced.
        builder
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?
    } else {
        builder.max_size(max_size.get()).build(manager)?
    };
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

const DEFAULT_MAX_SIZE: NonZeroU32 = NonZeroU32::MIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,

    #[cfg(feature = "tokio")]
    pub gatekeeper: self::gatekeeper::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            #[cfg(feature = "tokio")]
            gatekeeper: Default::default(),
        }
    }
}
