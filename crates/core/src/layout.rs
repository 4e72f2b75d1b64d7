// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk job store layout.
//!
//! ```text
//! running/<job-id>/.ready     written last by the producer
//! running/<job-id>/job        executable or script
//! running/<job-id>/job.out    stdout capture
//! running/<job-id>/job.err    stderr capture
//! done/<job-id>/...           relocated as a unit on completion
//! done/<job-id>/.done         exit status, written after relocation
//! ```
//!
//! Producers only create directories under `running/` and write `.ready`
//! last. Only the daemon moves directories into `done/` or writes `.done`.

use std::path::{Path, PathBuf};

use crate::JobId;

pub const RUNNING_DIR: &str = "running";
pub const DONE_DIR: &str = "done";
pub const READY_FILE: &str = ".ready";
pub const DONE_FILE: &str = ".done";
pub const JOB_FILE: &str = "job";
pub const STDOUT_FILE: &str = "job.out";
pub const STDERR_FILE: &str = "job.err";

/// Path resolution for a job store rooted at a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn running_dir(&self) -> PathBuf {
        self.root.join(RUNNING_DIR)
    }

    pub fn done_dir(&self) -> PathBuf {
        self.root.join(DONE_DIR)
    }

    /// `running/<id>`
    pub fn running_job(&self, id: &JobId) -> PathBuf {
        self.running_dir().join(id)
    }

    /// `done/<id>`
    pub fn done_job(&self, id: &JobId) -> PathBuf {
        self.done_dir().join(id)
    }

    pub fn ready_marker(&self, id: &JobId) -> PathBuf {
        self.running_job(id).join(READY_FILE)
    }

    /// Done marker inside the running area. Only ever present as a leftover.
    pub fn stale_done_marker(&self, id: &JobId) -> PathBuf {
        self.running_job(id).join(DONE_FILE)
    }

    pub fn job_file(&self, id: &JobId) -> PathBuf {
        self.running_job(id).join(JOB_FILE)
    }

    pub fn stdout_file(&self, id: &JobId) -> PathBuf {
        self.running_job(id).join(STDOUT_FILE)
    }

    pub fn stderr_file(&self, id: &JobId) -> PathBuf {
        self.running_job(id).join(STDERR_FILE)
    }

    pub fn done_marker(&self, id: &JobId) -> PathBuf {
        self.done_job(id).join(DONE_FILE)
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
