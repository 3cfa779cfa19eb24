// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starting, stopping and hot-reloading workers.

use std::fs;
use std::time::Duration;

use tw_core::{Project, ProjectId};

use super::Supervisor;
use crate::error::invalid;
use crate::process::{WorkerCommand, WorkerHandle};
use crate::SupervisorError;

/// How long to wait for a SIGKILLed worker to disappear.
const KILL_WAIT: Duration = Duration::from_secs(1);

impl Supervisor {
    /// Start the worker for a project and run one synchronous update.
    ///
    /// A failed initial update leaves the worker running and is reported as
    /// [`SupervisorError::InitialUpdate`].
    pub fn start(&mut self, key: &str) -> Result<WorkerHandle, SupervisorError> {
        self.census()?;
        let project = self.project(key)?;
        if let Some(handle) = self.running.get(&project.id) {
            return Err(invalid(format!(
                "project '{}' is already running (pid {})",
                project.name,
                handle.pid()
            )));
        }
        if !project.root.is_dir() {
            return Err(invalid(format!(
                "root of '{}' does not exist: {}",
                project.name,
                project.root.display()
            )));
        }

        let handle = self.spawn_worker(&project)?;
        if let Err(e) = self.render_project(&project) {
            return Err(SupervisorError::InitialUpdate { pid: handle.pid(), reason: e.to_string() });
        }
        Ok(handle)
    }

    fn spawn_worker(&mut self, project: &Project) -> Result<WorkerHandle, SupervisorError> {
        let scratch = self.config.scratch(&project.id);
        fs::create_dir_all(&scratch)?;

        let command = WorkerCommand {
            bin: self.config.worker_bin.clone(),
            project: project.id.clone(),
            root: project.root.clone(),
            outputs: project.outputs.clone(),
            ignore: project.ignore.iter().cloned().collect(),
            exclude: vec![self.config.state_dir.clone()],
            state_dir: self.config.state_dir.clone(),
            cwd: scratch,
            log: self.config.log_path(&project.id),
        };
        let mut child = command.spawn().map_err(|e| {
            SupervisorError::Spawn(format!("{}: {e}", self.config.worker_bin.display()))
        })?;

        let recorded = i32::try_from(child.id())
            .map_err(|_| SupervisorError::Spawn(format!("pid {} out of range", child.id())))
            .and_then(|pid| {
                self.liveness.write(pid, &project.id).map(|_| pid).map_err(|e| {
                    SupervisorError::Spawn(format!("failed to record worker {pid}: {e}"))
                })
            });
        let pid = match recorded {
            Ok(pid) => pid,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };

        tracing::info!(project = %project.id, name = %project.name, pid, "started worker");
        let handle = WorkerHandle::new(pid);
        self.running.insert(project.id.clone(), handle);
        Ok(handle)
    }

    /// Stop a project's worker. With `force`, a worker that outlives the
    /// grace period is killed.
    pub fn stop(&mut self, key: &str, force: bool) -> Result<(), SupervisorError> {
        let id = match self.project(key) {
            Ok(project) => project.id,
            // Workers of deleted projects can still be stopped by id
            Err(SupervisorError::Invalid(_)) => ProjectId::from_string(key),
            Err(e) => return Err(e),
        };
        if self.stop_worker(&id, force)? == 0 {
            return Err(invalid(format!("project '{key}' is not running")));
        }
        Ok(())
    }

    /// Signal every recorded worker of `id`, drop its records and wait for
    /// it to exit. Returns how many live workers were stopped.
    ///
    /// Records whose pid is gone or now belongs to another process are only
    /// removed; that process is never signalled or waited on.
    pub(super) fn stop_worker(
        &mut self,
        id: &ProjectId,
        force: bool,
    ) -> Result<usize, SupervisorError> {
        let pids: Vec<i32> = self
            .liveness
            .list()?
            .into_iter()
            .filter(|(_, project)| project == id)
            .map(|(pid, _)| pid)
            .collect();

        let mut stopped = 0;
        for pid in pids {
            let handle = WorkerHandle::new(pid);
            if !(handle.is_alive() && handle.runs_worker_for(id)) {
                tracing::info!(project = %id, pid, "removing stale liveness record");
                self.liveness.remove(pid)?;
                continue;
            }
            handle.terminate()?;
            self.liveness.remove(pid)?;
            stopped += 1;

            if handle.wait_for_exit(self.config.stop_grace) {
                tracing::info!(project = %id, pid, "stopped worker");
            } else if force {
                tracing::warn!(project = %id, pid, "worker ignored SIGTERM, killing");
                handle.kill()?;
                handle.wait_for_exit(KILL_WAIT);
            } else {
                tracing::warn!(project = %id, pid, "worker still alive after grace period");
            }
        }
        self.running.remove(id);
        Ok(stopped)
    }

    /// Restart the worker of `id` if one is running, so it picks up a new
    /// root, outputs, or ignore set. The old worker is killed if it outlives
    /// the grace period, so two never run side by side.
    pub(super) fn reload(&mut self, id: &ProjectId) -> Result<(), SupervisorError> {
        self.census()?;
        if !self.running.contains_key(id) {
            return Ok(());
        }
        tracing::info!(project = %id, "reloading worker");
        self.stop_worker(id, true)?;
        self.start(id.as_str())?;
        Ok(())
    }
}
