// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS-level handling of worker processes.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use tw_core::ProjectId;

const WAIT_STEP: Duration = Duration::from_millis(50);

/// A worker process known only by its pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerHandle {
    pid: i32,
}

impl WorkerHandle {
    pub fn new(pid: i32) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// Probe liveness with a null signal. Zombies count as dead.
    pub fn is_alive(&self) -> bool {
        if self.pid <= 0 {
            return false;
        }
        match kill(Pid::from_raw(self.pid), None) {
            Ok(()) => !is_zombie(self.pid),
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    /// True if the process looks like the watch worker for `project`.
    ///
    /// Guards against pid reuse. Where the command line cannot be read the
    /// answer is yes.
    pub fn runs_worker_for(&self, project: &ProjectId) -> bool {
        match cmdline(self.pid) {
            Some(args) => args.iter().any(|a| a == project.as_str()),
            None => true,
        }
    }

    /// Ask the worker to exit. A process that is already gone counts as success.
    pub fn terminate(&self) -> io::Result<()> {
        self.signal(Signal::SIGTERM)
    }

    pub fn kill(&self) -> io::Result<()> {
        self.signal(Signal::SIGKILL)
    }

    fn signal(&self, signal: Signal) -> io::Result<()> {
        match kill(Pid::from_raw(self.pid), signal) {
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(e) => Err(io::Error::from(e)),
        }
    }

    /// Reap the process if it is our child and has exited.
    fn try_reap(&self) {
        let _ = waitpid(Pid::from_raw(self.pid), Some(WaitPidFlag::WNOHANG));
    }

    /// Wait up to `grace` for the process to exit, reaping it when possible.
    /// Returns true once it is gone.
    pub fn wait_for_exit(&self, grace: Duration) -> bool {
        let deadline = Instant::now() + grace;
        loop {
            self.try_reap();
            if !self.is_alive() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(WAIT_STEP);
        }
    }
}

#[cfg(target_os = "linux")]
fn is_zombie(pid: i32) -> bool {
    // Format: `pid (comm) state ...`; comm may contain spaces or parens
    std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| stat.rfind(')').map(|i| stat[i + 1..].trim_start().starts_with('Z')))
        .unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
fn is_zombie(_pid: i32) -> bool {
    false
}

#[cfg(target_os = "linux")]
fn cmdline(pid: i32) -> Option<Vec<String>> {
    let raw = std::fs::read(format!("/proc/{pid}/cmdline")).ok()?;
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(|b| *b == 0)
            .filter(|s| !s.is_empty())
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect(),
    )
}

#[cfg(not(target_os = "linux"))]
fn cmdline(_pid: i32) -> Option<Vec<String>> {
    None
}

/// What to launch for one project's worker.
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    pub bin: PathBuf,
    pub project: ProjectId,
    pub root: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub ignore: Vec<String>,
    pub exclude: Vec<PathBuf>,
    pub state_dir: PathBuf,
    pub cwd: PathBuf,
    pub log: PathBuf,
}

impl WorkerCommand {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "watch".to_string(),
            "--project".to_string(),
            self.project.to_string(),
            "--root".to_string(),
            self.root.display().to_string(),
        ];
        for output in &self.outputs {
            args.extend(["--output".to_string(), output.display().to_string()]);
        }
        for name in &self.ignore {
            args.extend(["--ignore".to_string(), name.clone()]);
        }
        for path in &self.exclude {
            args.extend(["--exclude".to_string(), path.display().to_string()]);
        }
        args
    }

    /// Spawn detached from the terminal: own process group, stdio to the log.
    pub fn spawn(&self) -> io::Result<Child> {
        let log = open_log(&self.log)?;
        let log_err = log.try_clone()?;
        Command::new(&self.bin)
            .args(self.args())
            .current_dir(&self.cwd)
            .env("TW_STATE_DIR", &self.state_dir)
            .stdin(Stdio::null())
            .stdout(log)
            .stderr(log_err)
            .process_group(0)
            .spawn()
    }
}

fn open_log(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
