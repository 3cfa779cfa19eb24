// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-storage: serialized, recoverable access to persisted files

mod atomic;
mod backup;
mod format;
mod gateway;
mod lock;

pub use atomic::{is_temp_file, write_atomic, TEMP_EXTENSION};
pub use format::{Format, Json, Text};
pub use gateway::{
    Committed, Gateway, GatewayError, RecoveryPolicy, DEFAULT_LOCK_TIMEOUT, DEFAULT_RETENTION,
};
