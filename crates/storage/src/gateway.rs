// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locked read-modify-write transactions over persisted files.
//!
//! Every persisted mutation goes through [`Gateway::transact`]:
//!
//! 1. take the target's lock token (bounded wait),
//! 2. load and decode the current content, restoring the newest decodable
//!    backup if the content is corrupt,
//! 3. run the caller's mutator,
//! 4. back up the previous content and atomically replace the target.
//!
//! Lock tokens and backups live under the gateway root, keyed by the
//! target's absolute path, so nothing is ever created next to the target
//! except the short-lived temp file of the final rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::atomic::write_atomic;
use crate::backup::Backups;
use crate::format::Format;
use crate::lock;

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETENTION: usize = 5;

/// Errors raised by the gateway itself (never by a mutator).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("timed out after {waited:?} waiting for the lock on {}", target.display())]
    LockTimeout { target: PathBuf, waited: Duration },

    #[error("{} is corrupted and no backup could be restored", target.display())]
    Corrupted { target: PathBuf },

    #[error("{} was corrupted and has been restored from a backup", target.display())]
    RecoveredFromBackup { target: PathBuf },

    #[error("failed to encode {}: {source}", target.display())]
    Encode {
        target: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What to do when the target had to be restored from a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Run the mutator on the restored value.
    Continue,
    /// Persist the restored value, skip the mutator, and report
    /// [`GatewayError::RecoveredFromBackup`].
    Abort,
}

/// Result of a committed transaction or read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<V> {
    pub value: V,
    pub recovered_from_backup: bool,
}

struct Loaded<V> {
    value: V,
    /// Decodable pre-transaction bytes worth backing up
    raw: Option<Vec<u8>>,
    recovered: bool,
}

#[derive(Debug, Clone)]
pub struct Gateway {
    locks_dir: PathBuf,
    backups_dir: PathBuf,
    lock_timeout: Duration,
    retention: usize,
}

impl Gateway {
    /// Gateway keeping its lock tokens and backups under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            locks_dir: root.join("locks"),
            backups_dir: root.join("backups"),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            retention: DEFAULT_RETENTION,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    /// Locked read-modify-write of `target`.
    ///
    /// A corrupt target is restored from the newest decodable backup and the
    /// transaction continues on the restored value. Errors returned by
    /// `mutator` reach the caller unchanged and leave the target untouched.
    pub fn transact<F, E, M>(&self, target: &Path, mutator: M) -> Result<Committed<F::Value>, E>
    where
        F: Format,
        E: From<GatewayError>,
        M: FnOnce(F::Value) -> Result<F::Value, E>,
    {
        self.transact_with::<F, E, M>(target, RecoveryPolicy::Continue, mutator)
    }

    /// Like [`Gateway::transact`], but a restore from backup aborts before
    /// the mutator runs.
    pub fn transact_strict<F, E, M>(
        &self,
        target: &Path,
        mutator: M,
    ) -> Result<Committed<F::Value>, E>
    where
        F: Format,
        E: From<GatewayError>,
        M: FnOnce(F::Value) -> Result<F::Value, E>,
    {
        self.transact_with::<F, E, M>(target, RecoveryPolicy::Abort, mutator)
    }

    pub fn transact_with<F, E, M>(
        &self,
        target: &Path,
        policy: RecoveryPolicy,
        mutator: M,
    ) -> Result<Committed<F::Value>, E>
    where
        F: Format,
        E: From<GatewayError>,
        M: FnOnce(F::Value) -> Result<F::Value, E>,
    {
        let _guard = lock::acquire(&self.lock_path(target), target, self.lock_timeout)?;
        let backups = self.backups_for(target);
        let loaded = load::<F>(target, &backups)?;

        if loaded.recovered && policy == RecoveryPolicy::Abort {
            return Err(GatewayError::RecoveredFromBackup { target: target.to_path_buf() }.into());
        }

        let value = mutator(loaded.value)?;
        let bytes = F::encode(&value)
            .map_err(|source| GatewayError::Encode { target: target.to_path_buf(), source })?;

        if let Some(raw) = loaded.raw {
            backups.create(&raw).map_err(GatewayError::from)?;
        }
        write_atomic(target, &bytes).map_err(GatewayError::from)?;
        debug!(target = %target.display(), bytes = bytes.len(), "committed transaction");

        Ok(Committed { value, recovered_from_backup: loaded.recovered })
    }

    /// Locked read of `target` with the same corruption recovery, no write.
    pub fn read<F: Format>(&self, target: &Path) -> Result<Committed<F::Value>, GatewayError> {
        let _guard = lock::acquire(&self.lock_path(target), target, self.lock_timeout)?;
        let loaded = load::<F>(target, &self.backups_for(target))?;
        Ok(Committed { value: loaded.value, recovered_from_backup: loaded.recovered })
    }

    /// Retained backups of `target`, newest first.
    pub fn backups(&self, target: &Path) -> Result<Vec<PathBuf>, GatewayError> {
        Ok(self.backups_for(target).newest_first()?)
    }

    /// Path of the lock token guarding `target`.
    pub fn lock_path(&self, target: &Path) -> PathBuf {
        self.locks_dir.join(format!("{}.lock", target_key(target)))
    }

    fn backups_for(&self, target: &Path) -> Backups {
        Backups::new(self.backups_dir.join(target_key(target)), self.retention)
    }
}

fn load<F: Format>(target: &Path, backups: &Backups) -> Result<Loaded<F::Value>, GatewayError> {
    let bytes = match fs::read(target) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Loaded { value: F::empty(), raw: None, recovered: false });
        }
        Err(e) => return Err(e.into()),
    };
    if bytes.is_empty() {
        return Ok(Loaded { value: F::empty(), raw: None, recovered: false });
    }

    match F::decode(&bytes) {
        Ok(value) => Ok(Loaded { value, raw: Some(bytes), recovered: false }),
        Err(reason) => {
            warn!(target = %target.display(), %reason, "target is corrupted, trying backups");
            recover::<F>(target, backups)
        }
    }
}

fn recover<F: Format>(target: &Path, backups: &Backups) -> Result<Loaded<F::Value>, GatewayError> {
    for backup in backups.newest_first()? {
        let bytes = match fs::read(&backup) {
            Ok(b) => b,
            Err(e) => {
                warn!(backup = %backup.display(), error = %e, "unreadable backup");
                continue;
            }
        };
        match F::decode(&bytes) {
            Ok(value) => {
                write_atomic(target, &bytes)?;
                warn!(
                    target = %target.display(),
                    backup = %backup.display(),
                    "restored target from backup"
                );
                // The restored content already exists as a backup.
                return Ok(Loaded { value, raw: None, recovered: true });
            }
            Err(reason) => {
                warn!(backup = %backup.display(), %reason, "backup is corrupted too");
            }
        }
    }
    Err(GatewayError::Corrupted { target: target.to_path_buf() })
}

/// Stable per-target key: readable file name plus a hash of the full path.
fn target_key(target: &Path) -> String {
    let name: String = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let digest = Sha256::digest(target.to_string_lossy().as_bytes());
    let hash: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
    format!("{name}-{hash}")
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
