// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Poll interval of the reference deployment.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Directory for the rolling daemon log.
pub const DEFAULT_LOG_DIR: &str = "/var/log/jrd";

/// Poll interval override (`JR_POLL_INTERVAL_MS`).
pub fn poll_interval() -> Option<Duration> {
    std::env::var("JR_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

/// Log directory override (`JR_LOG_DIR`).
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("JR_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
