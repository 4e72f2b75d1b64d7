// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Done records: the exit status persisted as a job's done marker.
//!
//! The marker holds the status as decimal text followed by a newline.
//! Normal exits record the exit code, signal deaths record the negated
//! signal number, and jobs without an executable record
//! [`MISSING_EXECUTABLE`].

use std::fmt;
use std::process::ExitStatus;

use thiserror::Error;

/// Status recorded for a job directory that has no `job` file.
pub const MISSING_EXECUTABLE: i32 = -111;

/// Exit status of a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoneRecord {
    pub status: i32,
}

/// How a recorded status came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatusKind {
    Success,
    Failed,
    Signaled,
    MissingExecutable,
}

crate::simple_display! {
    ExitStatusKind {
        Success => "success",
        Failed => "failed",
        Signaled => "signaled",
        MissingExecutable => "missing executable",
    }
}

#[derive(Debug, Error)]
#[error("invalid done marker contents {contents:?}")]
pub struct ParseDoneError {
    pub contents: String,
}

impl DoneRecord {
    pub fn new(status: i32) -> Self {
        Self { status }
    }

    pub fn missing_executable() -> Self {
        Self::new(MISSING_EXECUTABLE)
    }

    /// Map a child's exit status to a recorded status.
    pub fn from_exit_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::new(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::new(-signal);
            }
        }
        Self::new(-1)
    }

    pub fn kind(&self) -> ExitStatusKind {
        match self.status {
            0 => ExitStatusKind::Success,
            MISSING_EXECUTABLE => ExitStatusKind::MissingExecutable,
            s if s < 0 => ExitStatusKind::Signaled,
            _ => ExitStatusKind::Failed,
        }
    }

    /// Contents of the done marker file.
    pub fn to_marker(&self) -> String {
        format!("{}\n", self.status)
    }

    pub fn parse_marker(contents: &str) -> Result<Self, ParseDoneError> {
        contents
            .trim()
            .parse::<i32>()
            .map(Self::new)
            .map_err(|_| ParseDoneError { contents: contents.to_string() })
    }
}

impl fmt::Display for DoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
