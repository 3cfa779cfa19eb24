// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Business rules for the project registry.
//!
//! Everything here is pure over the in-memory registry and the filesystem
//! facts it checks; persistence is the caller's job.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tw_core::{is_within, normalize, Project, ProjectId};

use crate::error::invalid;
use crate::SupervisorError;

/// Resolve `key` (id, name, or unambiguous id prefix) to an index.
pub(crate) fn position(projects: &[Project], key: &str) -> Result<usize, SupervisorError> {
    if let Some(i) = projects.iter().position(|p| p.id == key || p.name == key) {
        return Ok(i);
    }
    let matches: Vec<usize> = projects
        .iter()
        .enumerate()
        .filter(|(_, p)| !key.is_empty() && p.id.as_str().starts_with(key))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [i] => Ok(*i),
        [] => Err(invalid(format!("no project matches '{key}'"))),
        _ => Err(invalid(format!("'{key}' matches more than one project"))),
    }
}

pub(crate) fn find<'a>(projects: &'a [Project], key: &str) -> Result<&'a Project, SupervisorError> {
    position(projects, key).map(|i| &projects[i])
}

/// `path` with symlinks resolved as far as the filesystem allows: the path
/// itself when it exists, else its parent joined with the file name.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    match (path.parent().map(fs::canonicalize), path.file_name()) {
        (Some(Ok(parent)), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

fn check_protected(path: &Path, what: &str, protected: &[&Path]) -> Result<(), SupervisorError> {
    let real = resolved(path);
    let inside = |dir: &Path| {
        let real_dir = resolved(dir);
        [path, real.as_path()].iter().any(|p| is_within(p, dir) || is_within(p, &real_dir))
    };
    match protected.iter().find(|dir| inside(**dir)) {
        Some(dir) => Err(invalid(format!(
            "{what} {} is inside protected directory {}",
            path.display(),
            dir.display()
        ))),
        None => Ok(()),
    }
}

/// Normalize and validate a watched root.
pub(crate) fn check_root(raw: &str, protected: &[&Path]) -> Result<PathBuf, SupervisorError> {
    let root = normalize(raw);
    if !root.is_absolute() {
        return Err(invalid(format!("root must be an absolute path: {}", root.display())));
    }
    if !root.is_dir() {
        return Err(invalid(format!("root is not an existing directory: {}", root.display())));
    }
    check_protected(&root, "root", protected)?;
    Ok(root)
}

/// Normalize and validate an output path.
pub(crate) fn check_output(raw: &str, protected: &[&Path]) -> Result<PathBuf, SupervisorError> {
    let output = normalize(raw);
    if !output.is_absolute() {
        return Err(invalid(format!("output must be an absolute path: {}", output.display())));
    }
    if output.is_dir() {
        return Err(invalid(format!("output is a directory: {}", output.display())));
    }
    if !output.parent().is_some_and(Path::is_dir) {
        return Err(invalid(format!(
            "output's parent directory does not exist: {}",
            output.display()
        )));
    }
    check_protected(&output, "output", protected)?;
    Ok(output)
}

pub(crate) fn check_name(raw: &str) -> Result<String, SupervisorError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    Ok(name.to_string())
}

fn others<'a>(
    projects: &'a [Project],
    except: Option<&'a ProjectId>,
) -> impl Iterator<Item = &'a Project> {
    projects.iter().filter(move |p| Some(&p.id) != except)
}

pub(crate) fn check_unique_name(
    projects: &[Project],
    name: &str,
    except: Option<&ProjectId>,
) -> Result<(), SupervisorError> {
    if others(projects, except).any(|p| p.name == name) {
        return Err(invalid(format!("a project named '{name}' already exists")));
    }
    Ok(())
}

pub(crate) fn check_unique_root(
    projects: &[Project],
    root: &Path,
    except: Option<&ProjectId>,
) -> Result<(), SupervisorError> {
    if let Some(p) = others(projects, except).find(|p| p.root == root) {
        return Err(invalid(format!("{} is already watched by '{}'", root.display(), p.name)));
    }
    Ok(())
}

/// Outputs are unique across every project's outputs.
pub(crate) fn check_unique_output(
    projects: &[Project],
    output: &Path,
    except: Option<&ProjectId>,
) -> Result<(), SupervisorError> {
    if let Some(p) = others(projects, except).find(|p| p.owns_output(output)) {
        return Err(invalid(format!("{} is already an output of '{}'", output.display(), p.name)));
    }
    Ok(())
}

/// Ignore names are bare entry names.
pub(crate) fn check_ignore_names<I, S>(names: I) -> Result<BTreeSet<String>, SupervisorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for raw in names {
        let name = raw.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if name.contains('/') || name == "." || name == ".." {
            return Err(invalid(format!("ignore entries are plain names, got '{name}'")));
        }
        set.insert(name.to_string());
    }
    Ok(set)
}

/// Ignore name suggested by a muted path.
///
/// A muted file (last segment contains a dot) suggests its directory; a
/// muted directory suggests itself.
pub(crate) fn ignore_name_for(muted: &Path) -> Option<String> {
    let last = muted.file_name()?.to_string_lossy();
    if last.contains('.') {
        let parent = muted.parent()?.file_name()?;
        Some(parent.to_string_lossy().into_owned())
    } else {
        Some(last.into_owned())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
