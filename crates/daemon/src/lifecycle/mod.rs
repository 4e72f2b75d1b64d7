// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::{enter_working_dir, startup};

use std::fs::File;
use std::io::{Seek, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use jr_core::Layout;
use thiserror::Error;
use tracing::{info, warn};

use crate::env;
use crate::store::{JobStore, StoreError};

/// Lock file inside the working directory; holds the daemon's PID.
pub const LOCK_FILE: &str = "jrd.pid";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding `running/` and `done/`
    pub working_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Directory for the rolling log file
    pub log_dir: PathBuf,
    /// Delay between cycles
    pub poll_interval: Duration,
}

impl Config {
    /// Configuration for a daemon serving `working_dir`.
    ///
    /// `JR_POLL_INTERVAL_MS` and `JR_LOG_DIR` override the defaults.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Self {
            lock_path: working_dir.join(LOCK_FILE),
            log_dir: env::log_dir().unwrap_or_else(|| PathBuf::from(env::DEFAULT_LOG_DIR)),
            poll_interval: env::poll_interval().unwrap_or(env::DEFAULT_POLL_INTERVAL),
            working_dir,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.working_dir)
    }
}

/// Daemon state during operation.
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    lock_file: File,
    /// When daemon started
    pub start_time: Instant,
}

impl DaemonState {
    /// Rewrite the PID in the lock file (after backgrounding changed it).
    pub fn record_pid(&mut self) -> Result<(), LifecycleError> {
        self.lock_file.set_len(0)?;
        self.lock_file.rewind()?;
        writeln!(self.lock_file, "{}", std::process::id())?;
        Ok(())
    }

    /// Ensure the job store areas exist and hand out the store.
    pub fn prepare_store(&self) -> Result<JobStore, LifecycleError> {
        let store = JobStore::new(self.config.layout());
        store.ensure_layout()?;
        info!(root = %store.layout().root().display(), "job store ready");
        Ok(store)
    }

    /// Shutdown the daemon.
    ///
    /// Job processes are not touched; they keep running and their
    /// directories stay in `running/` until a later daemon reaps them.
    pub fn shutdown(&mut self) {
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "daemon shutdown");

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }
        // Lock is released when self.lock_file is dropped
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Cannot use working directory {0}: {1}")]
    WorkingDir(PathBuf, #[source] std::io::Error),

    #[error("Failed to acquire lock: another jrd is already running in this working directory")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to change effective group to '{name}': {source}")]
    Group {
        name: String,
        #[source]
        source: nix::errno::Errno,
    },

    #[error("No such group '{0}'")]
    UnknownGroup(String),

    #[error("Failed to run in background: {0}")]
    Daemonize(#[source] nix::errno::Errno),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
