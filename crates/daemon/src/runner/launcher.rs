// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher: start one child process per admitted job.

use std::fs::File;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Stdio;

use jr_core::layout::JOB_FILE;
use jr_core::{Clock, DoneRecord, JobId};
use tokio::process::Command;

use super::{ActiveJob, Runner, RunnerError};

/// Shell used to run the job file, so it may be a script or a binary.
const SHELL: &str = "/bin/sh";

/// Result of launching a ready job.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// Child process started; the job is now active.
    Started(ActiveJob),
    /// No job file; complete immediately with this status.
    Degenerate(DoneRecord),
}

impl<C: Clock> Runner<C> {
    /// Start the job in `running/<id>`.
    ///
    /// The caller has already seen the ready marker. Nothing is retried.
    pub fn launch(&self, id: &JobId) -> Result<LaunchOutcome, RunnerError> {
        let layout = self.store.layout();
        if !self.store.has_job_file(id) {
            return Ok(LaunchOutcome::Degenerate(DoneRecord::missing_executable()));
        }

        let dir = layout.running_job(id);
        let job_file = layout.job_file(id);
        make_executable(&job_file).map_err(prepare_err(id, &job_file))?;

        let (stdout_path, stderr_path) = (layout.stdout_file(id), layout.stderr_file(id));
        let stdout = File::create(&stdout_path).map_err(prepare_err(id, &stdout_path))?;
        let stderr = File::create(&stderr_path).map_err(prepare_err(id, &stderr_path))?;

        let child = Command::new(SHELL)
            .arg("-c")
            .arg(format!("./{JOB_FILE}"))
            .current_dir(&dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            // Own process group: terminal signals aimed at the daemon must
            // not reach jobs.
            .process_group(0)
            .spawn()
            .map_err(|source| RunnerError::Spawn { id: id.clone(), source })?;

        Ok(LaunchOutcome::Started(ActiveJob { dir, since: self.clock.now(), child }))
    }
}

/// Add execute permission for owner, group and other, keeping other bits.
fn make_executable(path: &Path) -> std::io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms)
}

fn prepare_err<'a>(id: &'a JobId, path: &'a Path) -> impl FnOnce(std::io::Error) -> RunnerError + 'a {
    move |source| RunnerError::Prepare { id: id.clone(), path: path.to_path_buf(), source }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
