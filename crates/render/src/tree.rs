// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory walk producing the visual listing.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Names never shown, regardless of project configuration.
pub const SYSTEM_IGNORES: &[&str] =
    &[".git", "__pycache__", ".venv", ".vscode", ".pytest_cache", ".mypy_cache"];

pub(crate) const BRANCH: &str = "├── ";
pub(crate) const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// One rendered line and the relative path it stands for.
///
/// Directory keys end with `/`; the root's key is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub line: String,
    pub key: String,
}

/// Root line text, e.g. `project/`.
pub(crate) fn root_label(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    format!("{}/", name.trim_end_matches('/'))
}

pub(crate) fn build(root: &Path, ignore: &BTreeSet<String>) -> io::Result<Vec<Node>> {
    let root_line = root_label(root);
    let mut nodes = vec![Node { line: root_line, key: String::new() }];
    walk(root, "", "", ignore, &mut nodes)?;
    Ok(nodes)
}

fn is_ignored(name: &str, ignore: &BTreeSet<String>) -> bool {
    SYSTEM_IGNORES.contains(&name) || ignore.contains(name)
}

fn walk(
    dir: &Path,
    prefix: &str,
    rel: &str,
    ignore: &BTreeSet<String>,
    nodes: &mut Vec<Node>,
) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        // Vanished between listing and descent
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_ignored(&name, ignore) {
            continue;
        }
        let file_type = entry.file_type()?;
        // Symlinked dirs are listed as dirs but never followed.
        let is_dir = file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir());
        if is_dir {
            dirs.push((name, file_type.is_symlink()));
        } else {
            files.push(name);
        }
    }
    dirs.sort();
    files.sort();

    let total = dirs.len() + files.len();
    let mut index = 0;
    for (name, is_link) in dirs {
        index += 1;
        let last = index == total;
        let key = format!("{rel}{name}/");
        nodes.push(Node { line: branch_line(prefix, last, &format!("{name}/")), key: key.clone() });
        if !is_link {
            let child_prefix = format!("{prefix}{}", if last { BLANK } else { PIPE });
            walk(&dir.join(&name), &child_prefix, &key, ignore, nodes)?;
        }
    }
    for name in files {
        index += 1;
        let last = index == total;
        nodes.push(Node { line: branch_line(prefix, last, &name), key: format!("{rel}{name}") });
    }
    Ok(())
}

fn branch_line(prefix: &str, last: bool, label: &str) -> String {
    format!("{prefix}{}{label}", if last { LAST_BRANCH } else { BRANCH })
}
