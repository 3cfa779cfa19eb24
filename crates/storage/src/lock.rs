// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-wait exclusive locks on token files.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::GatewayError;

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Holds an exclusive lock until dropped.
pub(crate) struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Acquire the lock token at `lock_path`, waiting at most `timeout`.
///
/// The token is never truncated or removed, so holders and waiters always
/// agree on the same inode.
pub(crate) fn acquire(
    lock_path: &Path,
    target: &Path,
    timeout: Duration,
) -> Result<LockGuard, GatewayError> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file =
        OpenOptions::new().read(true).write(true).create(true).truncate(false).open(lock_path)?;

    let started = Instant::now();
    loop {
        match file.try_lock_exclusive() {
            Ok(()) => return Ok(LockGuard { file }),
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                let waited = started.elapsed();
                if waited >= timeout {
                    return Err(GatewayError::LockTimeout { target: target.to_path_buf(), waited });
                }
                std::thread::sleep(RETRY_INTERVAL.min(timeout - waited));
            }
            Err(e) => return Err(e.into()),
        }
    }
}
