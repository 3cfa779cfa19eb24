// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the supervisor crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::SupervisorError;

/// Resolve state directory: TW_STATE_DIR > XDG_STATE_HOME/treewarden > ~/.local/state/treewarden
pub fn state_dir() -> Result<PathBuf, SupervisorError> {
    if let Ok(dir) = std::env::var("TW_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("treewarden"));
    }
    let home = dirs::home_dir().ok_or(SupervisorError::NoStateDir)?;
    Ok(home.join(".local/state/treewarden"))
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Bounded wait for a Gateway lock (default 5s)
pub fn lock_timeout() -> Duration {
    millis("TW_LOCK_TIMEOUT_MS").unwrap_or(tw_storage::DEFAULT_LOCK_TIMEOUT)
}

/// Backups kept per Gateway target (default 5)
pub fn backup_retention() -> usize {
    std::env::var("TW_BACKUP_RETENTION")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(tw_storage::DEFAULT_RETENTION)
}

/// Worker poll interval (default 2s)
pub fn poll_interval() -> Duration {
    millis("TW_POLL_INTERVAL_MS").unwrap_or(Duration::from_secs(2))
}

/// How long stop waits for a worker to exit (default 3s)
pub fn stop_grace() -> Duration {
    millis("TW_STOP_GRACE_MS").unwrap_or(Duration::from_secs(3))
}

/// Executable spawned as the watch worker. Defaults to the running binary.
pub fn worker_bin() -> Option<PathBuf> {
    std::env::var("TW_WORKER_BIN").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
