// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamped backup snapshots of one gateway target.
//!
//! Each backup is `<UTC timestamp>-<seq>.bak`, so lexical order of file
//! names is creation order. At most `retention` backups are kept; the
//! oldest are pruned first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::atomic::write_atomic;

const BAK_EXTENSION: &str = "bak";

pub(crate) struct Backups {
    dir: PathBuf,
    retention: usize,
}

impl Backups {
    pub(crate) fn new(dir: PathBuf, retention: usize) -> Self {
        Self { dir, retention }
    }

    /// Store `bytes` as the newest backup, then prune beyond retention.
    pub(crate) fn create(&self, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.9fZ").to_string();
        let mut seq = 0u32;
        let path = loop {
            let candidate = self.dir.join(format!("{stamp}-{seq:03}.{BAK_EXTENSION}"));
            if !candidate.exists() {
                break candidate;
            }
            seq += 1;
        };
        write_atomic(&path, bytes)?;
        self.prune();
        Ok(path)
    }

    /// All retained backups, newest first.
    pub(crate) fn newest_first(&self) -> io::Result<Vec<PathBuf>> {
        let mut backups = self.list()?;
        backups.reverse();
        Ok(backups)
    }

    fn list(&self) -> io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut backups: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| is_backup(p))
            .collect();
        backups.sort();
        Ok(backups)
    }

    fn prune(&self) {
        let backups = match self.list() {
            Ok(b) => b,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "failed to list backups for pruning");
                return;
            }
        };
        let excess = backups.len().saturating_sub(self.retention);
        for old in &backups[..excess] {
            if let Err(e) = fs::remove_file(old) {
                warn!(path = %old.display(), error = %e, "failed to prune backup");
            }
        }
    }
}

fn is_backup(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == BAK_EXTENSION)
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
