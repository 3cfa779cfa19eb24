// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem change notifications fed to the throttler.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// One observed change to a file under a watched tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
    /// File size after the change, when known
    pub size: Option<u64>,
}

impl ChangeEvent {
    pub fn created(path: impl Into<PathBuf>, size: u64) -> Self {
        Self { path: path.into(), kind: ChangeKind::Created, size: Some(size) }
    }

    pub fn modified(path: impl Into<PathBuf>, size: Option<u64>) -> Self {
        Self { path: path.into(), kind: ChangeKind::Modified, size }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), kind: ChangeKind::Deleted, size: None }
    }
}
