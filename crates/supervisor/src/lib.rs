// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-supervisor: registry rules, worker lifecycle and artifact updates

mod config;
pub mod env;
mod error;
mod liveness;
mod process;
mod registry;
mod supervisor;

pub use config::Config;
pub use error::SupervisorError;
pub use liveness::LivenessRecords;
pub use process::{WorkerCommand, WorkerHandle};
pub use supervisor::{Edit, Supervisor};
