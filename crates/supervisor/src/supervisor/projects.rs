// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry mutations: add, edit, outputs, delete.

use std::fs;
use std::io;

use tw_core::{normalize, Project};

use super::Supervisor;
use crate::error::invalid;
use crate::registry;
use crate::SupervisorError;

/// A single-field edit of a project record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Name(String),
    Root(String),
    /// Replaces every output
    Outputs(Vec<String>),
}

fn remove_if_exists(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Supervisor {
    /// Apply `apply` to one project inside a registry transaction.
    ///
    /// Returns the updated record and whether its worker needs a restart
    /// (root, outputs, or ignore set changed).
    fn modify<F>(&self, key: &str, apply: F) -> Result<(Project, bool), SupervisorError>
    where
        F: FnOnce(&[Project], &mut Project) -> Result<(), SupervisorError>,
    {
        self.commit(|projects| {
            let i = registry::position(projects, key)?;
            let mut updated = projects[i].clone();
            apply(projects, &mut updated)?;

            let before = &projects[i];
            let restart = before.root != updated.root
                || before.outputs != updated.outputs
                || before.ignore != updated.ignore;
            projects[i] = updated.clone();
            Ok((updated, restart))
        })
    }

    fn modified(&mut self, (project, restart): (Project, bool)) -> Result<Project, SupervisorError> {
        if restart {
            self.reload(&project.id)?;
        }
        Ok(project)
    }

    pub fn add(&self, name: &str, root: &str, output: &str) -> Result<Project, SupervisorError> {
        let name = registry::check_name(name)?;
        let protected = self.config.protected_dirs();
        let root = registry::check_root(root, &protected)?;
        let output = registry::check_output(output, &protected)?;

        let project = self.commit(|projects| {
            registry::check_unique_name(projects, &name, None)?;
            registry::check_unique_root(projects, &root, None)?;
            registry::check_unique_output(projects, &output, None)?;
            let project = Project::new(name, root, output);
            projects.push(project.clone());
            Ok(project)
        })?;
        tracing::info!(project = %project.id, name = %project.name, "project added");
        Ok(project)
    }

    /// Change one field. A running worker is restarted when its root or
    /// outputs changed.
    pub fn edit(&mut self, key: &str, edit: Edit) -> Result<Project, SupervisorError> {
        let protected = self.config.protected_dirs();

        let outcome = match edit {
            Edit::Name(raw) => {
                let name = registry::check_name(&raw)?;
                self.modify(key, |projects, project| {
                    registry::check_unique_name(projects, &name, Some(&project.id))?;
                    project.name = name;
                    Ok(())
                })?
            }
            Edit::Root(raw) => {
                let root = registry::check_root(&raw, &protected)?;
                self.modify(key, |projects, project| {
                    registry::check_unique_root(projects, &root, Some(&project.id))?;
                    project.root = root;
                    Ok(())
                })?
            }
            Edit::Outputs(raws) => {
                let mut outputs = Vec::with_capacity(raws.len());
                for raw in &raws {
                    let output = registry::check_output(raw, &protected)?;
                    if !outputs.contains(&output) {
                        outputs.push(output);
                    }
                }
                if outputs.is_empty() {
                    return Err(invalid("a project needs at least one output"));
                }
                self.modify(key, |projects, project| {
                    for output in &outputs {
                        registry::check_unique_output(projects, output, Some(&project.id))?;
                    }
                    project.outputs = outputs;
                    Ok(())
                })?
            }
        };
        tracing::info!(project = %outcome.0.id, "project edited");
        self.modified(outcome)
    }

    pub fn add_output(&mut self, key: &str, raw: &str) -> Result<Project, SupervisorError> {
        let output = registry::check_output(raw, &self.config.protected_dirs())?;
        let outcome = self.modify(key, |projects, project| {
            if project.owns_output(&output) {
                return Err(invalid(format!(
                    "{} is already an output of '{}'",
                    output.display(),
                    project.name
                )));
            }
            registry::check_unique_output(projects, &output, Some(&project.id))?;
            project.outputs.push(output);
            Ok(())
        })?;
        self.modified(outcome)
    }

    pub fn remove_output(&mut self, key: &str, raw: &str) -> Result<Project, SupervisorError> {
        let output = normalize(raw);
        let outcome = self.modify(key, |_, project| {
            if !project.owns_output(&output) {
                return Err(invalid(format!(
                    "{} is not an output of '{}'",
                    output.display(),
                    project.name
                )));
            }
            if project.outputs.len() == 1 {
                return Err(invalid(format!(
                    "'{}' must keep at least one output",
                    project.name
                )));
            }
            project.outputs.retain(|o| o != &output);
            Ok(())
        })?;
        self.modified(outcome)
    }

    /// Stop the worker, drop the record, and clear everything kept for the
    /// project under the state dir. Generated artifacts stay.
    pub fn delete(&mut self, key: &str) -> Result<Project, SupervisorError> {
        let project = self.project(key)?;
        self.stop_worker(&project.id, true)?;

        self.commit(|projects| {
            let i = registry::position(projects, project.id.as_str())?;
            projects.remove(i);
            Ok(())
        })?;

        remove_if_exists(fs::remove_file(self.config.mute_record(&project.id)))?;
        remove_if_exists(fs::remove_dir_all(self.config.scratch(&project.id)))?;
        remove_if_exists(fs::remove_file(self.config.log_path(&project.id)))?;
        tracing::info!(project = %project.id, name = %project.name, "project deleted");
        Ok(project)
    }
}
