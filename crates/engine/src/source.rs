// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change sources: where the watch loop gets its events from.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use tw_core::ChangeEvent;
use walkdir::{DirEntry, WalkDir};

/// Directories the watcher never descends into.
pub const BOOKKEEPING_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".venv",
    "venv",
    ".vscode",
    ".pytest_cache",
    ".mypy_cache",
    "logs",
    "temp",
    "tmp",
];

/// Produces the changes observed since the previous call.
pub trait ChangeSource {
    fn poll(&mut self) -> io::Result<Vec<ChangeEvent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: SystemTime,
    size: u64,
}

/// Snapshot-diffing source built on periodic directory walks.
pub struct PollingSource {
    root: PathBuf,
    ignore: BTreeSet<String>,
    /// Outputs and excluded paths, never reported
    skip: BTreeSet<PathBuf>,
    snapshot: HashMap<PathBuf, Stamp>,
}

impl PollingSource {
    /// Create a source and take its initial snapshot.
    pub fn new(
        root: impl Into<PathBuf>,
        ignore: BTreeSet<String>,
        skip: impl IntoIterator<Item = PathBuf>,
    ) -> io::Result<Self> {
        let mut source = Self {
            root: root.into(),
            ignore,
            skip: skip.into_iter().collect(),
            snapshot: HashMap::new(),
        };
        source.snapshot = source.scan()?;
        Ok(source)
    }

    /// Number of files in the current snapshot.
    pub fn tracked(&self) -> usize {
        self.snapshot.len()
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if self.ignore.contains(name.as_ref()) || self.skip.contains(entry.path()) {
            return false;
        }
        if entry.file_type().is_dir() {
            return !BOOKKEEPING_DIRS.contains(&name.as_ref());
        }
        !tw_storage::is_temp_file(entry.path())
    }

    fn scan(&self) -> io::Result<HashMap<PathBuf, Stamp>> {
        let mut files = HashMap::new();
        let walker = WalkDir::new(&self.root).follow_links(false).into_iter();
        for entry in walker.filter_entry(|e| self.keep(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                // Vanished mid-walk or unreadable; picked up next cycle
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            files.insert(entry.into_path(), Stamp { modified, size: meta.len() });
        }
        Ok(files)
    }
}

impl ChangeSource for PollingSource {
    fn poll(&mut self) -> io::Result<Vec<ChangeEvent>> {
        let current = self.scan()?;
        let events = diff(&self.snapshot, &current);
        self.snapshot = current;
        Ok(events)
    }
}

fn diff(old: &HashMap<PathBuf, Stamp>, new: &HashMap<PathBuf, Stamp>) -> Vec<ChangeEvent> {
    let mut events: Vec<ChangeEvent> = new
        .iter()
        .filter_map(|(path, stamp)| match old.get(path) {
            None => Some(ChangeEvent::created(path.clone(), stamp.size)),
            Some(prev) if stamp.modified > prev.modified || stamp.size != prev.size => {
                Some(ChangeEvent::modified(path.clone(), Some(stamp.size)))
            }
            Some(_) => None,
        })
        .collect();
    events.extend(
        old.keys().filter(|p| !new.contains_key(*p)).map(|p| ChangeEvent::deleted(p.clone())),
    );
    events.sort_by(|a, b| a.path.cmp(&b.path));
    events
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
