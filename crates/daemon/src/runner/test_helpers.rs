// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for runner tests.

pub(crate) use super::{CycleReport, LaunchOutcome, Runner, RunnerError};
pub(crate) use crate::store::{JobStore, StoreError};
pub(crate) use jr_core::{DoneRecord, FakeClock, JobId, Layout};
pub(crate) use std::path::PathBuf;
pub(crate) use std::time::Duration;

use tempfile::TempDir;

/// Script that prints "hello" and exits 0.
pub(crate) const HELLO: &str = "#!/bin/sh\necho hello\n";

/// A job store in a temporary working directory.
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub layout: Layout,
    pub clock: FakeClock,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        JobStore::new(layout.clone()).ensure_layout().unwrap();
        Self { dir, layout, clock: FakeClock::new() }
    }

    pub fn runner(&self) -> Runner<FakeClock> {
        Runner::new(JobStore::new(self.layout.clone()), self.clock.clone())
    }

    /// Create `running/<id>`, optionally with a job script, optionally ready.
    pub fn add_job(&self, id: &str, script: Option<&str>, ready: bool) -> JobId {
        let id = JobId::new(id);
        std::fs::create_dir_all(self.layout.running_job(&id)).unwrap();
        if let Some(script) = script {
            std::fs::write(self.layout.job_file(&id), script).unwrap();
        }
        if ready {
            self.mark_ready(&id);
        }
        id
    }

    pub fn mark_ready(&self, id: &JobId) {
        std::fs::write(self.layout.ready_marker(id), b"").unwrap();
    }

    pub fn running(&self, id: &str) -> PathBuf {
        self.layout.running_job(&JobId::new(id))
    }

    pub fn done(&self, id: &str) -> PathBuf {
        self.layout.done_job(&JobId::new(id))
    }

    pub fn done_marker(&self, id: &str) -> Option<String> {
        std::fs::read_to_string(self.layout.done_marker(&JobId::new(id))).ok()
    }

    /// Recursive listing of the working directory, for no-change assertions.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        fn walk(dir: &std::path::Path, out: &mut Vec<PathBuf>) {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(&path, out);
                }
                out.push(path);
            }
        }
        let mut out = Vec::new();
        walk(self.dir.path(), &mut out);
        out.sort();
        out
    }
}

/// Cycle until `id` is reported completed, giving its process time to exit.
pub(crate) async fn cycle_until_completed(runner: &mut Runner<FakeClock>, id: &str) -> CycleReport {
    for _ in 0..500 {
        let report = runner.cycle();
        if report.completed.iter().any(|c| c == id) {
            return report;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not complete");
}
