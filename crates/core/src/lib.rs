// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-core: job store conventions shared by the job runner daemon and its
//! producers.

pub mod macros;

pub mod clock;
pub mod id;
pub mod layout;
pub mod record;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use clock::{Clock, SystemClock};
pub use id::{InvalidJobId, JobId};
pub use layout::Layout;
pub use record::{DoneRecord, ExitStatusKind, ParseDoneError, MISSING_EXECUTABLE};
