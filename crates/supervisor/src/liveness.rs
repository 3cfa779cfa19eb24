// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness records: `<pid>.worker` files whose content is the project id.
//!
//! These files are the only evidence of which workers are running.

use std::fs;
use std::io;
use std::path::PathBuf;

use tw_core::ProjectId;
use tw_storage::write_atomic;

const EXTENSION: &str = "worker";

#[derive(Debug, Clone)]
pub struct LivenessRecords {
    dir: PathBuf,
}

impl LivenessRecords {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, pid: i32) -> PathBuf {
        self.dir.join(format!("{pid}.{EXTENSION}"))
    }

    pub fn write(&self, pid: i32, project: &ProjectId) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        write_atomic(&self.path(pid), project.as_str().as_bytes())
    }

    /// Remove the record for `pid`. A missing record is not an error.
    pub fn remove(&self, pid: i32) -> io::Result<()> {
        match fs::remove_file(self.path(pid)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// All well-formed records as `(pid, project)`, sorted by pid.
    pub fn list(&self) -> io::Result<Vec<(i32, ProjectId)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == EXTENSION) {
                continue;
            }
            let Some(pid) = path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse().ok())
            else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(content) if !content.trim().is_empty() => {
                    records.push((pid, ProjectId::from_string(content.trim())));
                }
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "empty liveness record, removing");
                    let _ = fs::remove_file(&path);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable liveness record")
                }
            }
        }
        records.sort_by_key(|(pid, _)| *pid);
        Ok(records)
    }
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
