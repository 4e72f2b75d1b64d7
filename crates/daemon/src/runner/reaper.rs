// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reaper: record finished jobs and hand them over through `done/`.

use std::collections::BTreeSet;

use jr_core::{Clock, DoneRecord, JobId};
use tracing::info;

use super::{collect_errors, Runner, RunnerError};

impl<C: Clock> Runner<C> {
    /// Complete every active job whose process has exited.
    ///
    /// Exited handles are collected first and applied afterwards. A job
    /// leaves the active set in the same pass its done marker is written;
    /// if completion fails the job stays active and is retried next cycle.
    pub fn reap(&mut self) -> Result<BTreeSet<JobId>, RunnerError> {
        let mut errors = Vec::new();
        let mut exited = Vec::new();
        for (id, job) in self.active.iter_mut() {
            match job.child.try_wait() {
                Ok(Some(status)) => exited.push((id.clone(), DoneRecord::from_exit_status(status))),
                Ok(None) => {}
                Err(source) => errors.push(RunnerError::Wait { id: id.clone(), source }),
            }
        }

        let mut completed = BTreeSet::new();
        for (id, record) in exited {
            if let Err(e) = self.store.complete(&id, record) {
                errors.push(e.into());
                continue;
            }
            if let Some(job) = self.active.remove(&id) {
                let elapsed = self.clock.now().saturating_duration_since(job.since);
                info!(
                    job_id = %id,
                    exit_code = record.status,
                    outcome = %record.kind(),
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "job completed"
                );
            }
            completed.insert(id);
        }

        collect_errors(errors).map(|()| completed)
    }
}

#[cfg(test)]
#[path = "reaper_tests.rs"]
mod tests;
