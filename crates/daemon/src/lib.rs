// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner daemon library
//!
//! Watches `<working-dir>/running` for job directories, runs each ready job
//! as a child process and hands finished jobs over through `<working-dir>/done`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod logging;
pub mod privileges;
pub mod runner;
pub mod shutdown;
pub mod store;

pub use lifecycle::{Config, DaemonState, LifecycleError};
pub use runner::{ActiveJob, CycleReport, LaunchOutcome, Runner, RunnerError};
pub use store::{JobStore, StoreError};
