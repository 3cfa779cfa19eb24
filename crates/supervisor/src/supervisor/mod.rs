// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The stateless supervisor.
//!
//! Nothing survives between invocations except what is on disk: the
//! registry, liveness records, and mute records. Every operation that needs
//! to know which workers run starts with a census of the liveness records.

mod artifacts;
mod lifecycle;
mod mutes;
mod projects;

pub use projects::Edit;

use std::collections::HashMap;
use std::fs;

use tw_core::{Project, ProjectId, ProjectStatus, ProjectView};
use tw_storage::{Gateway, Json};

use crate::config::Config;
use crate::liveness::LivenessRecords;
use crate::process::WorkerHandle;
use crate::registry;
use crate::SupervisorError;

type Registry = Json<Vec<Project>>;

pub struct Supervisor {
    config: Config,
    gateway: Gateway,
    liveness: LivenessRecords,
    /// Workers found alive by the last census
    running: HashMap<ProjectId, WorkerHandle>,
}

impl Supervisor {
    pub fn new(config: Config) -> Self {
        Self {
            gateway: config.gateway(),
            liveness: LivenessRecords::new(&config.workers_dir),
            running: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Workers found alive by the last census.
    pub fn running(&self) -> &HashMap<ProjectId, WorkerHandle> {
        &self.running
    }

    /// Current registry content.
    pub fn projects(&self) -> Result<Vec<Project>, SupervisorError> {
        let committed = self.gateway.read::<Registry>(&self.config.registry_path)?;
        if committed.recovered_from_backup {
            tracing::warn!(path = %self.config.registry_path.display(), "registry restored from backup");
        }
        Ok(committed.value)
    }

    /// Look up a project by id, name, or unambiguous id prefix.
    pub fn project(&self, key: &str) -> Result<Project, SupervisorError> {
        let projects = self.projects()?;
        registry::find(&projects, key).cloned()
    }

    /// Apply `apply` to the registry in one strict Gateway transaction.
    ///
    /// A registry restored from backup yields [`SupervisorError::RetryNeeded`]
    /// without running `apply`.
    fn commit<T, F>(&self, apply: F) -> Result<T, SupervisorError>
    where
        F: FnOnce(&mut Vec<Project>) -> Result<T, SupervisorError>,
    {
        fs::create_dir_all(&self.config.state_dir)?;
        let mut output = None;
        self.gateway.transact_strict::<Registry, SupervisorError, _>(
            &self.config.registry_path,
            |mut projects| {
                output = Some(apply(&mut projects)?);
                Ok(projects)
            },
        )?;
        output.ok_or_else(|| SupervisorError::Invalid("registry update produced no result".into()))
    }

    /// Rebuild the set of running workers from liveness records.
    ///
    /// Live workers are adopted; records whose process is gone (or whose pid
    /// now belongs to something else) are deleted.
    pub fn census(&mut self) -> Result<(), SupervisorError> {
        let mut found: HashMap<ProjectId, WorkerHandle> = HashMap::new();
        for (pid, project) in self.liveness.list()? {
            let handle = WorkerHandle::new(pid);
            if !handle.is_alive() || !handle.runs_worker_for(&project) {
                tracing::info!(pid, project = %project, "removing stale liveness record");
                self.liveness.remove(pid)?;
                continue;
            }
            if let Some(existing) = found.get(&project) {
                tracing::warn!(
                    pid,
                    other = existing.pid(),
                    project = %project,
                    "more than one live worker for project"
                );
                continue;
            }
            if !self.running.contains_key(&project) {
                tracing::debug!(pid, project = %project, "adopted running worker");
            }
            found.insert(project, handle);
        }
        self.running = found;
        Ok(())
    }

    /// All projects with their reconciled status.
    ///
    /// Workers whose project is gone, or whose root no longer exists, are
    /// stopped on the way.
    pub fn list(&mut self) -> Result<Vec<ProjectView>, SupervisorError> {
        let projects = self.projects()?;
        self.census()?;

        let orphans: Vec<ProjectId> = self
            .running
            .keys()
            .filter(|id| !projects.iter().any(|p| &p.id == *id))
            .cloned()
            .collect();
        for id in orphans {
            tracing::warn!(project = %id, "stopping worker of unknown project");
            self.stop_worker(&id, false)?;
        }

        let mut views = Vec::with_capacity(projects.len());
        for project in projects {
            let valid = project.root.is_dir();
            let mut status =
                if valid { ProjectStatus::Stopped } else { ProjectStatus::InvalidPath };
            let mut pid = None;

            if let Some(handle) = self.running.get(&project.id).copied() {
                if valid {
                    status = ProjectStatus::Running;
                    pid = Some(handle.pid());
                } else {
                    tracing::warn!(
                        project = %project.id,
                        root = %project.root.display(),
                        "root vanished, stopping worker"
                    );
                    self.stop_worker(&project.id, false)?;
                }
            }
            if status != ProjectStatus::InvalidPath && !self.mutes_of(&project.id).is_empty() {
                status = ProjectStatus::Muting;
            }
            views.push(ProjectView { project, status, pid });
        }
        Ok(views)
    }
}

#[cfg(test)]
#[path = "../supervisor_tests/mod.rs"]
mod tests;
