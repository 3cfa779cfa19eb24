// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-engine: change detection, throttling and the per-project watch loop

pub mod source;
pub mod throttle;
pub mod watch;

pub use source::{ChangeSource, PollingSource, BOOKKEEPING_DIRS};
pub use throttle::{Decision, SuppressReason, ThrottleConfig, Throttler};
pub use watch::{install_stop_flag, CycleReport, Regenerate, SelfInvoke, WatchError, WatchWorker};
