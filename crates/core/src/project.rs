// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project records as persisted in the registry, and their derived status.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ProjectId;

/// One watched tree and the artifacts generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Absolute path of the watched tree
    pub root: PathBuf,
    /// Absolute paths of the generated artifacts (never empty)
    pub outputs: Vec<PathBuf>,
    /// Entry names left out of the listing and ignored by the watcher
    #[serde(default)]
    pub ignore: BTreeSet<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, root: PathBuf, output: PathBuf) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            root,
            outputs: vec![output],
            ignore: BTreeSet::new(),
        }
    }

    pub fn owns_output(&self, path: &Path) -> bool {
        self.outputs.iter().any(|o| o == path)
    }
}

/// Derived supervision status. Never persisted; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Stopped,
    Running,
    InvalidPath,
    Muting,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Stopped => "stopped",
            ProjectStatus::Running => "running",
            ProjectStatus::InvalidPath => "invalid_path",
            ProjectStatus::Muting => "muting",
        };
        f.write_str(s)
    }
}

/// A project record together with its reconciled status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub status: ProjectStatus,
    /// Pid of the live worker, when one was found by the census
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i32>,
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
