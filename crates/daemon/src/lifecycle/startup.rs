// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: working directory and single-instance lock.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fs2::FileExt;

use super::{Config, DaemonState, LifecycleError};

/// Resolve `path` against the current directory, create it if missing, and
/// make it the process's current directory.
///
/// Runs before logging is set up, so progress goes to stderr.
pub fn enter_working_dir(path: &Path) -> Result<PathBuf, LifecycleError> {
    let cwd = std::env::current_dir()?;
    let working_dir = cwd.join(path);
    if !working_dir.exists() {
        eprintln!(
            "Working directory '{}' does not exist. Attempting to create...",
            working_dir.display()
        );
        std::fs::create_dir_all(&working_dir)
            .map_err(|e| LifecycleError::WorkingDir(working_dir.clone(), e))?;
    }
    std::env::set_current_dir(&working_dir)
        .map_err(|e| LifecycleError::WorkingDir(working_dir.clone(), e))?;
    Ok(working_dir)
}

/// Start the daemon: take the single-instance lock.
///
/// The job store areas are created later by [`DaemonState::prepare_store`],
/// once logging is up.
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    // Use OpenOptions to avoid truncating the file before we hold the lock,
    // which would wipe the running daemon's PID.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file (truncate now that we hold the lock)
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    Ok(DaemonState { config: config.clone(), lock_file, start_time: Instant::now() })
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
