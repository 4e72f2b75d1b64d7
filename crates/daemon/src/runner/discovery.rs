// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discovery: admit newly ready job directories.

use std::collections::BTreeSet;

use jr_core::{Clock, JobId};
use tracing::{debug, info, warn};

use super::{collect_errors, LaunchOutcome, Runner, RunnerError};

impl<C: Clock> Runner<C> {
    /// Admit every untracked job directory that has a ready marker.
    ///
    /// Directories without a ready marker are left untouched and looked at
    /// again next cycle. A launch failure for one job does not stop the
    /// others; all failures are returned together.
    pub fn discover(&mut self) -> Result<BTreeSet<JobId>, RunnerError> {
        let candidates: BTreeSet<JobId> = self
            .store
            .list_running()?
            .into_iter()
            .filter(|id| !self.active.contains_key(id))
            .collect();
        self.waiting.retain(|id| candidates.contains(id));

        let mut admitted = BTreeSet::new();
        let mut errors = Vec::new();
        for id in candidates {
            let first_seen = !self.waiting.contains(&id);

            if first_seen && self.store.has_stale_done(&id) {
                let stale_status = self.store.read_stale_done(&id).map(|r| r.status);
                warn!(job_id = %id, ?stale_status, "found old done marker in new job; ignoring it");
            }

            if !self.store.has_ready(&id) {
                if first_seen {
                    info!(job_id = %id, "new job directory has no ready marker; not starting");
                    self.waiting.insert(id);
                } else {
                    debug!(job_id = %id, "still waiting for ready marker");
                }
                continue;
            }

            self.waiting.remove(&id);
            match self.admit(&id) {
                Ok(()) => {
                    admitted.insert(id);
                }
                Err(e) => errors.push(e),
            }
        }

        collect_errors(errors).map(|()| admitted)
    }

    fn admit(&mut self, id: &JobId) -> Result<(), RunnerError> {
        match self.launch(id)? {
            LaunchOutcome::Started(job) => {
                info!(job_id = %id, pid = job.child.id(), dir = %job.dir.display(), "started job");
                self.active.insert(id.clone(), job);
            }
            LaunchOutcome::Degenerate(record) => {
                warn!(job_id = %id, status = %record, "no job file found; moving to done");
                self.store.complete(id, record)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
