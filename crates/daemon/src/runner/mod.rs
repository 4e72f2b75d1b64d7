// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle engine.
//!
//! The [`Runner`] owns the active job set and drives one cycle at a time:
//! discovery (which launches newly ready jobs), then reaping of finished
//! child processes. Everything runs on one control thread; child processes
//! run in parallel at the OS level and are only ever polled, never awaited.

mod discovery;
mod launcher;
mod reaper;

pub use launcher::LaunchOutcome;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use jr_core::{Clock, JobId};
use thiserror::Error;
use tokio::process::Child;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::store::{JobStore, StoreError};

/// A launched job whose child process has not been reaped yet.
#[derive(Debug)]
pub struct ActiveJob {
    /// Job directory the process was started in
    pub dir: PathBuf,
    /// When discovery admitted the job
    pub since: Instant,
    pub child: Child,
}

/// What one cycle changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Jobs admitted by discovery (started or completed as degenerate)
    pub admitted: BTreeSet<JobId>,
    /// Jobs whose completion was recorded by the reaper
    pub completed: BTreeSet<JobId>,
}

impl CycleReport {
    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty() && self.completed.is_empty()
    }
}

/// Runner errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to prepare job {id} at '{path}': {source}")]
    Prepare {
        id: JobId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn job {id}: {source}")]
    Spawn {
        id: JobId,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to poll job {id}: {source}")]
    Wait {
        id: JobId,
        #[source]
        source: std::io::Error,
    },

    #[error("{} jobs failed: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<RunnerError>),
}

fn join_errors(errors: &[RunnerError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Collapse per-job failures of one pass into a single result.
fn collect_errors(mut errors: Vec<RunnerError>) -> Result<(), RunnerError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(RunnerError::Multiple(errors)),
    }
}

/// Runner context: the job store plus the in-memory active job set.
pub struct Runner<C: Clock> {
    store: JobStore,
    clock: C,
    active: BTreeMap<JobId, ActiveJob>,
    /// Untracked directories already reported as lacking a ready marker
    waiting: BTreeSet<JobId>,
}

impl<C: Clock> Runner<C> {
    pub fn new(store: JobStore, clock: C) -> Self {
        Self { store, clock, active: BTreeMap::new(), waiting: BTreeSet::new() }
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_ids(&self) -> impl Iterator<Item = &JobId> {
        self.active.keys()
    }

    /// Run discovery then reaping once.
    ///
    /// Failures are logged and contained here so one bad job directory
    /// cannot stop the loop.
    pub fn cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        match self.discover() {
            Ok(admitted) => report.admitted = admitted,
            Err(e) => error!(critical = true, error = %e, "discovery failed"),
        }

        match self.reap() {
            Ok(completed) => report.completed = completed,
            Err(e) => error!(critical = true, error = %e, "reaping failed"),
        }

        if !report.is_empty() {
            debug!(
                admitted = report.admitted.len(),
                completed = report.completed.len(),
                active = self.active.len(),
                "cycle finished"
            );
        }
        report
    }

    /// Cycle every `poll_interval` until `shutdown` is cancelled.
    ///
    /// Cancellation is observed between cycles only. Children still running
    /// at shutdown are left alone.
    pub async fn run(&mut self, poll_interval: Duration, shutdown: CancellationToken) {
        info!(?poll_interval, "starting up");

        while !shutdown.is_cancelled() {
            self.cycle();

            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }

        if !self.active.is_empty() {
            let ids: Vec<&str> = self.active.keys().map(JobId::as_str).collect();
            info!(count = ids.len(), jobs = ?ids, "abandoning in-flight jobs");
        }
        info!("shutting down");
    }
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
