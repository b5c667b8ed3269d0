// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::spawn_blocking, time::sleep};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};

/// Serialize all database access of asynchronous tasks
///
/// Each task gets exclusive access to the `SQLite` database while it
/// is running. Tasks are admitted one after another in the order of
/// their arrival. Waiting tasks are suspended, i.e. they don't block
/// any threads while waiting.
///
/// The task handlers are executed on a thread for blocking operations
/// and receive a pooled connection together with a flag that is raised
/// when the current task should be aborted.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: Arc<Mutex<ConnectionPool>>,
    acquire_timeout: Duration,
    pending_tasks_counter: Arc<AtomicUsize>,
    abort_current_task_flag: Arc<AtomicBool>,
    decommissioned: AtomicBool,
}

/// Counts a task as pending until dropped.
struct PendingTaskScope {
    counter: Arc<AtomicUsize>,
}

impl PendingTaskScope {
    #[must_use]
    fn new(counter: Arc<AtomicUsize>) -> Self {
        let pending_tasks_before = counter.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Submitting task: {} pending task(s)",
            pending_tasks_before + 1
        );
        Self { counter }
    }
}

impl Drop for PendingTaskScope {
    fn drop(&mut self) {
        let pending_tasks_before = self.counter.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_tasks_before > 0);
        log::debug!(
            "Finished task: {} pending task(s)",
            pending_tasks_before - 1
        );
    }
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_timeout_millis,
        } = config;
        let acquire_timeout = Duration::from_millis(acquire_timeout_millis.get());
        Self {
            connection_pool: Arc::new(Mutex::new(connection_pool)),
            acquire_timeout,
            pending_tasks_counter: Default::default(),
            abort_current_task_flag: Default::default(),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequently submitted tasks
    ///
    /// Tasks that are already running are not affected.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_decommissioned(&self) -> bool {
        self.decommissioned.load(Ordering::Acquire)
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.is_decommissioned() {
            return Err(Error::Decommissioned);
        }
        Ok(())
    }

    /// Run a task with exclusive access to the database
    ///
    /// Returns whatever the handler returns. Errors of the handler are
    /// neither interpreted nor retried.
    pub async fn spawn_blocking_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection, Arc<AtomicBool>) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let pending_task_scope = PendingTaskScope::new(Arc::clone(&self.pending_tasks_counter));
        let timeout = sleep(self.acquire_timeout);
        tokio::pin!(timeout);
        let guard = tokio::select! {
            () = &mut timeout => {
                return Err(Error::TaskTimeout {
                    reason: "database is locked".to_owned(),
                });
            }
            guard = Arc::clone(&self.connection_pool).lock_owned() => guard,
        };
        self.check_not_decommissioned()?;
        let abort_current_task_flag = Arc::clone(&self.abort_current_task_flag);
        // Every task gets the chance to run when admitted
        abort_current_task_flag.store(false, Ordering::Release);
        // The guard is owned by the blocking task to keep the database locked
        // until the handler has returned, even if the caller stops waiting.
        spawn_blocking(move || {
            let _pending_task_scope = pending_task_scope;
            let connection = get_pooled_connection(&guard)?;
            Ok(connection_handler(connection, abort_current_task_flag))
        })
        .await
        .map_err(Error::TaskScheduling)?
    }

    /// Number of submitted tasks that have not finished yet
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks_counter.load(Ordering::Relaxed)
    }

    /// Request the currently running task to abort
    ///
    /// Cooperative, i.e. it is up to the task to check the flag.
    pub fn abort_current_task(&self) {
        self.abort_current_task_flag.store(true, Ordering::Release);
    }
}

const DEFAULT_ACQUIRE_TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(30_000).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_timeout_millis: NonZeroU64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            acquire_timeout_millis: DEFAULT_ACQUIRE_TIMEOUT_MILLIS,
        }
    }
}
