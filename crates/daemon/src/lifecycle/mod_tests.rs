// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use serial_test::serial;
use tempfile::tempdir;

use super::*;

#[test]
#[serial]
fn config_defaults() {
    std::env::remove_var("JR_POLL_INTERVAL_MS");
    std::env::remove_var("JR_LOG_DIR");

    let config = Config::new("/srv/jobs");

    assert_eq!(config.lock_path, PathBuf::from("/srv/jobs/jrd.pid"));
    assert_eq!(config.poll_interval, Duration::from_secs(15));
    assert_eq!(config.log_dir, PathBuf::from("/var/log/jrd"));
    assert_eq!(config.layout().running_dir(), PathBuf::from("/srv/jobs/running"));
}

#[test]
#[serial]
fn config_env_overrides() {
    std::env::set_var("JR_POLL_INTERVAL_MS", "250");
    std::env::set_var("JR_LOG_DIR", "/tmp/jrd-logs");

    let config = Config::new("/srv/jobs");

    std::env::remove_var("JR_POLL_INTERVAL_MS");
    std::env::remove_var("JR_LOG_DIR");
    assert_eq!(config.poll_interval, Duration::from_millis(250));
    assert_eq!(config.log_dir, PathBuf::from("/tmp/jrd-logs"));
}

#[test]
#[serial]
fn config_ignores_unusable_poll_interval() {
    for value in ["0", "soon", ""] {
        std::env::set_var("JR_POLL_INTERVAL_MS", value);
        assert_eq!(Config::new("/srv/jobs").poll_interval, Duration::from_secs(15), "{value:?}");
    }
    std::env::remove_var("JR_POLL_INTERVAL_MS");
}

#[test]
fn prepare_store_creates_job_areas() {
    let dir = tempdir().unwrap();
    let daemon = startup(&Config::new(dir.path())).unwrap();

    let store = daemon.prepare_store().unwrap();

    assert!(store.layout().running_dir().is_dir());
    assert!(store.layout().done_dir().is_dir());
}

#[test]
fn prepare_store_failure_is_fatal() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("done"), b"in the way").unwrap();
    let daemon = startup(&Config::new(dir.path())).unwrap();

    assert!(matches!(daemon.prepare_store(), Err(LifecycleError::Store(_))));
}

#[test]
fn record_pid_rewrites_lock_file() {
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path());
    std::fs::write(&config.lock_path, "1234567890\n").unwrap();
    let mut daemon = startup(&config).unwrap();

    daemon.record_pid().unwrap();

    let content = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(content, format!("{}\n", std::process::id()));
}

#[test]
fn shutdown_removes_lock_file() {
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path());
    let mut daemon = startup(&config).unwrap();

    daemon.shutdown();

    assert!(!config.lock_path.exists());
}
