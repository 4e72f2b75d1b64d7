// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon log output: stdout, or a daily rolling file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleError;

/// Log file name prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "jrd";
/// Rotated log files kept, including the current one
pub const LOG_FILES_KEPT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Rolling file in this directory
    File(PathBuf),
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines on drop; hold it for the
/// daemon's lifetime. `RUST_LOG` overrides the default `info` filter.
pub fn init(target: &LogTarget) -> Result<WorkerGuard, LifecycleError> {
    let (writer, guard) = match target {
        LogTarget::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .max_log_files(LOG_FILES_KEPT)
                .build(dir)
                .map_err(|e| LifecycleError::Logging(e.to_string()))?;
            tracing_appender::non_blocking(appender)
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(matches!(target, LogTarget::Stdout))
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}
