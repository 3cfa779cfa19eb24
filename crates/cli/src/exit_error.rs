// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return errors instead of calling `std::process::exit()`
//! directly; `main()` turns them into an `ExitError` and exits with its code.

use std::fmt;

use tw_supervisor::SupervisorError;

pub const FAILURE: i32 = 1;
/// The registry was restored from a backup and nothing was applied
pub const RETRY_NEEDED: i32 = 10;
/// A panic reached the command boundary
pub const INTERNAL: i32 = 99;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<anyhow::Error> for ExitError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ExitError>() {
            Ok(exit) => return exit,
            Err(err) => err,
        };
        let code = match err.downcast_ref::<SupervisorError>() {
            Some(SupervisorError::RetryNeeded) => RETRY_NEEDED,
            _ => FAILURE,
        };
        Self::new(code, format!("{err:#}"))
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
