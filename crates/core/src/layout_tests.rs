// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn layout() -> Layout {
    Layout::new("/srv/jobs")
}

#[test]
fn areas_are_siblings_under_root() {
    let layout = layout();
    assert_eq!(layout.running_dir(), Path::new("/srv/jobs/running"));
    assert_eq!(layout.done_dir(), Path::new("/srv/jobs/done"));
}

#[yare::parameterized(
    ready = { Layout::ready_marker, "/srv/jobs/running/abc123/.ready" },
    stale_done = { Layout::stale_done_marker, "/srv/jobs/running/abc123/.done" },
    job = { Layout::job_file, "/srv/jobs/running/abc123/job" },
    stdout = { Layout::stdout_file, "/srv/jobs/running/abc123/job.out" },
    stderr = { Layout::stderr_file, "/srv/jobs/running/abc123/job.err" },
    done = { Layout::done_marker, "/srv/jobs/done/abc123/.done" },
)]
fn job_paths(path_of: fn(&Layout, &JobId) -> PathBuf, expected: &str) {
    assert_eq!(path_of(&layout(), &JobId::new("abc123")), Path::new(expected));
}

#[test]
fn running_and_done_job_share_file_name() {
    let layout = layout();
    let id = JobId::new("abc123");
    assert_eq!(layout.running_job(&id).file_name(), layout.done_job(&id).file_name());
}
