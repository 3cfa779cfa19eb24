// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration and the on-disk layout of the state dir.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tw_core::ProjectId;
use tw_storage::Gateway;

use crate::{env, SupervisorError};

#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/treewarden)
    pub state_dir: PathBuf,
    /// Project registry
    pub registry_path: PathBuf,
    /// Liveness records, one `<pid>.worker` per running worker
    pub workers_dir: PathBuf,
    /// Mute-signal records written by workers
    pub mutes_dir: PathBuf,
    /// Per-project worker logs
    pub logs_dir: PathBuf,
    /// Per-project worker working directories
    pub scratch_dir: PathBuf,
    /// Gateway lock tokens and backups
    pub gateway_dir: PathBuf,
    /// Executable spawned as `<bin> watch …`
    pub worker_bin: PathBuf,
    /// Directory holding the installed executable, protected like the state dir
    pub install_dir: Option<PathBuf>,
    pub lock_timeout: Duration,
    pub backup_retention: usize,
    pub poll_interval: Duration,
    pub stop_grace: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, SupervisorError> {
        let exe = std::env::current_exe()?;
        let mut config = Self::new(env::state_dir()?, env::worker_bin().unwrap_or(exe.clone()));
        config.install_dir = exe.parent().map(Path::to_path_buf);
        config.lock_timeout = env::lock_timeout();
        config.backup_retention = env::backup_retention();
        config.poll_interval = env::poll_interval();
        config.stop_grace = env::stop_grace();
        Ok(config)
    }

    /// Configuration rooted at `state_dir` with default tunables.
    pub fn new(state_dir: impl Into<PathBuf>, worker_bin: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            registry_path: state_dir.join("registry.json"),
            workers_dir: state_dir.join("workers"),
            mutes_dir: state_dir.join("mutes"),
            logs_dir: state_dir.join("logs"),
            scratch_dir: state_dir.join("scratch"),
            gateway_dir: state_dir.join("gateway"),
            worker_bin: worker_bin.into(),
            install_dir: None,
            lock_timeout: tw_storage::DEFAULT_LOCK_TIMEOUT,
            backup_retention: tw_storage::DEFAULT_RETENTION,
            poll_interval: Duration::from_secs(2),
            stop_grace: Duration::from_secs(3),
            state_dir,
        }
    }

    pub fn gateway(&self) -> Gateway {
        Gateway::new(&self.gateway_dir)
            .with_lock_timeout(self.lock_timeout)
            .with_retention(self.backup_retention)
    }

    pub fn mute_record(&self, id: &ProjectId) -> PathBuf {
        self.mutes_dir.join(format!("{id}.json"))
    }

    pub fn log_path(&self, id: &ProjectId) -> PathBuf {
        self.logs_dir.join(format!("{id}.log"))
    }

    pub fn scratch(&self, id: &ProjectId) -> PathBuf {
        self.scratch_dir.join(id.as_str())
    }

    /// Directories no watched root or output may live in.
    pub fn protected_dirs(&self) -> Vec<&Path> {
        let mut dirs = vec![self.state_dir.as_path()];
        dirs.extend(self.install_dir.as_deref());
        dirs
    }
}
