// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-to-temp-then-rename file replacement.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension carried by in-flight temp files. Scanners skip these.
pub const TEMP_EXTENSION: &str = "tw-tmp";

/// Atomically replace `path` with `bytes`.
///
/// The content goes to a uniquely named sibling temp file, is forced to
/// stable storage, then renamed over the target. Readers see either the old
/// or the new content, never a prefix of it.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path_for(path);
    let result = write_synced(&tmp_path, bytes).and_then(|_| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }
    sync_parent(path);
    Ok(())
}

/// True for files produced by [`write_atomic`] that have not been renamed yet.
pub fn is_temp_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEMP_EXTENSION)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let tmp_name = format!(".{}.{}.{}", name, nanoid::nanoid!(8), TEMP_EXTENSION);
    path.with_file_name(tmp_name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// Best effort: persists the rename itself on filesystems that need it.
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
