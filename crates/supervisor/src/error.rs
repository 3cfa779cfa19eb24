// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use thiserror::Error;
use tw_storage::GatewayError;

#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A business rule rejected the request. The message is shown verbatim.
    #[error("{0}")]
    Invalid(String),

    /// The registry was restored from a backup; nothing was applied.
    #[error("the registry was corrupted and has been restored from a backup; nothing was changed, please retry")]
    RetryNeeded,

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("failed to start worker: {0}")]
    Spawn(String),

    #[error("worker started (pid {pid}) but the initial update failed: {reason}")]
    InitialUpdate { pid: i32, reason: String },

    #[error(transparent)]
    Gateway(GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<GatewayError> for SupervisorError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::RecoveredFromBackup { .. } => SupervisorError::RetryNeeded,
            other => SupervisorError::Gateway(other),
        }
    }
}

pub(crate) fn invalid(message: impl Into<String>) -> SupervisorError {
    SupervisorError::Invalid(message.into())
}
