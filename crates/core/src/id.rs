// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifiers.
//!
//! A job's identifier is the name of its directory under the running area.
//! It is chosen by the producer and is otherwise opaque to the daemon.

use std::ffi::OsStr;

use thiserror::Error;

crate::define_id! {
    /// Identifier of a job directory (its file name under `running/` or `done/`).
    pub struct JobId;
}

/// A directory entry name that cannot be used as a job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidJobId {
    #[error("job id is empty")]
    Empty,

    #[error("job id '{0}' is a relative path component")]
    Relative(String),

    #[error("job id '{0}' contains a path separator or NUL")]
    Separator(String),

    #[error("job id is not valid UTF-8: {0}")]
    NotUtf8(String),
}

impl JobId {
    /// Validate a directory entry name as a job identifier.
    pub fn parse(name: &str) -> Result<Self, InvalidJobId> {
        if name.is_empty() {
            return Err(InvalidJobId::Empty);
        }
        if name == "." || name == ".." {
            return Err(InvalidJobId::Relative(name.to_string()));
        }
        if name.contains(['/', '\0']) {
            return Err(InvalidJobId::Separator(name.to_string()));
        }
        Ok(Self::new(name))
    }

    /// Validate a raw file name as read from the filesystem.
    pub fn from_file_name(name: &OsStr) -> Result<Self, InvalidJobId> {
        match name.to_str() {
            Some(name) => Self::parse(name),
            None => Err(InvalidJobId::NotUtf8(name.to_string_lossy().into_owned())),
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
