// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem job store: the `running/` and `done/` areas and their markers.
//!
//! Relocation is a single `rename(2)` of the whole job directory, so a
//! collector watching `done/` sees either nothing or the complete job. The
//! done marker is written after the move through a temporary file, so it
//! appears with its full contents.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use jr_core::layout::DONE_FILE;
use jr_core::{DoneRecord, JobId, Layout};
use thiserror::Error;
use tracing::{debug, info};

/// Job store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("done/{0} already exists; waiting for it to be collected")]
    AlreadyDone(JobId),
}

fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> StoreError + 'a {
    move |source| StoreError::Io { op, path: path.to_path_buf(), source }
}

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err("remove", path)(e)),
    }
}

/// Filesystem operations on a job store rooted at a working directory.
#[derive(Debug, Clone)]
pub struct JobStore {
    layout: Layout,
}

impl JobStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Create the running and done areas if they are missing.
    pub fn ensure_layout(&self) -> Result<(), StoreError> {
        for dir in [self.layout.running_dir(), self.layout.done_dir()] {
            if !dir.is_dir() {
                info!(dir = %dir.display(), "creating directory");
                std::fs::create_dir_all(&dir).map_err(io_err("create directory", &dir))?;
            }
        }
        Ok(())
    }

    /// Names of all entries in the running area.
    ///
    /// Entries whose names cannot be job ids are skipped.
    pub fn list_running(&self) -> Result<BTreeSet<JobId>, StoreError> {
        let dir = self.layout.running_dir();
        let entries = std::fs::read_dir(&dir).map_err(io_err("list", &dir))?;

        let mut ids = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(io_err("list", &dir))?;
            match JobId::from_file_name(&entry.file_name()) {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => debug!(error = %e, "skipping running entry"),
            }
        }
        Ok(ids)
    }

    pub fn has_ready(&self, id: &JobId) -> bool {
        self.layout.ready_marker(id).exists()
    }

    /// True when a done marker was left inside the running area.
    pub fn has_stale_done(&self, id: &JobId) -> bool {
        self.layout.stale_done_marker(id).exists()
    }

    /// Status held by a done marker left inside the running area, if it parses.
    pub fn read_stale_done(&self, id: &JobId) -> Option<DoneRecord> {
        let contents = std::fs::read_to_string(self.layout.stale_done_marker(id)).ok()?;
        DoneRecord::parse_marker(&contents).ok()
    }

    pub fn has_job_file(&self, id: &JobId) -> bool {
        self.layout.job_file(id).exists()
    }

    /// Move `running/<id>` to `done/<id>`.
    ///
    /// The ready marker and any leftover done markers are removed first,
    /// then the directory is renamed in one step. An existing `done/<id>` is
    /// never overwritten.
    pub fn relocate(&self, id: &JobId) -> Result<PathBuf, StoreError> {
        let src = self.layout.running_job(id);
        let dest = self.layout.done_job(id);
        if dest.exists() {
            return Err(StoreError::AlreadyDone(id.clone()));
        }

        remove_if_present(&self.layout.ready_marker(id))?;
        let stale = self.layout.stale_done_marker(id);
        remove_if_present(&stale)?;
        let stale_tmp = tmp_marker(&stale);
        if stale_tmp.is_dir() {
            std::fs::remove_dir_all(&stale_tmp).map_err(io_err("remove", &stale_tmp))?;
        }
        remove_if_present(&stale_tmp)?;

        std::fs::rename(&src, &dest).map_err(io_err("move", &src))?;
        Ok(dest)
    }

    /// Write the done marker of a relocated job.
    pub fn write_done(&self, id: &JobId, record: DoneRecord) -> Result<(), StoreError> {
        let path = self.layout.done_marker(id);
        let tmp_path = tmp_marker(&path);
        std::fs::write(&tmp_path, record.to_marker()).map_err(io_err("write", &tmp_path))?;
        std::fs::rename(&tmp_path, &path).map_err(io_err("write", &path))
    }

    /// Relocate a finished job and record its status.
    ///
    /// Safe to retry: when an earlier attempt already moved the directory
    /// but failed to write the marker, only the marker is written.
    pub fn complete(&self, id: &JobId, record: DoneRecord) -> Result<PathBuf, StoreError> {
        let dest = if !self.layout.running_job(id).exists() && self.layout.done_job(id).is_dir() {
            debug!(job_id = %id, "job already relocated; writing done marker");
            self.layout.done_job(id)
        } else {
            self.relocate(id)?
        };
        self.write_done(id, record)?;
        Ok(dest)
    }
}

fn tmp_marker(marker: &Path) -> PathBuf {
    marker.with_file_name(format!("{DONE_FILE}.tmp"))
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
