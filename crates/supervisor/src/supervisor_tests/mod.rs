// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod artifacts;
mod lifecycle;
mod mutes;
mod projects;

use super::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Stand-in worker: stays alive until signalled, and keeps its arguments
/// (including the project id) in its command line.
const WORKER_SCRIPT: &str = "#!/bin/sh\nwhile true; do sleep 1; done\n";

/// Stand-in worker that shrugs off SIGTERM.
const STUBBORN_WORKER_SCRIPT: &str = "#!/bin/sh\ntrap '' TERM\nwhile true; do sleep 1; done\n";

struct Fixture {
    dir: TempDir,
    sup: Supervisor,
}

impl Fixture {
    fn new() -> Self {
        Self::with_worker(WORKER_SCRIPT)
    }

    fn with_worker(script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let worker = bin.join("worker.sh");
        fs::write(&worker, script).unwrap();
        fs::set_permissions(&worker, fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = Config::new(dir.path().join("state"), worker);
        config.lock_timeout = Duration::from_millis(500);
        config.stop_grace = Duration::from_secs(3);
        let sup = Supervisor::new(config);
        Self { dir, sup }
    }

    /// A second supervisor over the same state dir, as a new invocation would see it.
    fn fresh(&self) -> Supervisor {
        Supervisor::new(self.sup.config().clone())
    }

    /// Create `work/<name>/` with a couple of files.
    fn tree(&self, name: &str) -> PathBuf {
        let root = self.dir.path().join("work").join(name);
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("Cargo.toml"), "[package]\n").unwrap();
        root
    }

    fn add(&self, name: &str) -> Project {
        let root = self.tree(name);
        self.sup.add(name, &s(&root), &s(&root.join("README.md"))).unwrap()
    }

    fn records(&self) -> Vec<(i32, ProjectId)> {
        LivenessRecords::new(&self.sup.config().workers_dir).list().unwrap()
    }

    fn write_mutes(&self, id: &ProjectId, paths: &[&Path]) {
        let path = self.sup.config().mute_record(id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string(paths).unwrap()).unwrap();
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let own = std::process::id() as i32;
        let records = LivenessRecords::new(&self.sup.config().workers_dir).list();
        for (pid, _) in records.unwrap_or_default().into_iter().filter(|(pid, _)| *pid != own) {
            let handle = WorkerHandle::new(pid);
            let _ = handle.kill();
            handle.wait_for_exit(Duration::from_secs(1));
        }
    }
}

fn s(path: &Path) -> String {
    path.display().to_string()
}

fn status_of(sup: &mut Supervisor, id: &ProjectId) -> ProjectView {
    sup.list().unwrap().into_iter().find(|v| &v.project.id == id).unwrap()
}
