//! Shared helpers for specs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::{Duration, Instant};

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tempfile::TempDir;

/// Upper bound for anything a worker has to notice.
pub const SPEC_WAIT_MAX_MS: u64 = 10_000;

/// Poll interval handed to workers so specs do not wait seconds per cycle.
const SPEC_POLL_MS: &str = "200";

/// Poll `check` every 50ms until it passes or `max_ms` elapses.
pub fn wait_for(max_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    loop {
        if check() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// True once `pid` no longer runs (exited zombies count as gone).
pub fn process_gone(pid: i32) -> bool {
    if kill(Pid::from_raw(pid), None).is_err() {
        return true;
    }
    fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| stat.rfind(')').map(|i| stat[i + 1..].trim_start().starts_with('Z')))
        .unwrap_or(false)
}

/// `tw` without any sandbox, for commands that never touch state.
pub fn cli() -> CliCommand {
    CliCommand::new()
}

pub struct CliCommand {
    cmd: assert_cmd::Command,
}

impl CliCommand {
    fn new() -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("tw").unwrap();
        cmd.env("NO_COLOR", "1").env_remove("COLOR").env_remove("RUST_LOG");
        Self { cmd }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn run(mut self) -> RunAssert {
        RunAssert { output: self.cmd.output().unwrap() }
    }

    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    pub fn fails_with(self, code: i32) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}:\n{}", self.stdout());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}:\n{}", self.stderr());
        self
    }
}

/// A temp dir holding a state dir and the trees specs register.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state(&self) -> PathBuf {
        self.path().join("state")
    }

    /// Absolute path of `rel` as a string, ready for the command line.
    pub fn abs(&self, rel: &str) -> String {
        self.path().join(rel).display().to_string()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).unwrap_or_default()
    }

    pub fn tw(&self) -> CliCommand {
        let mut cli = cli()
            .env("TW_STATE_DIR", self.state())
            .env("TW_POLL_INTERVAL_MS", SPEC_POLL_MS)
            .env("TW_LOCK_TIMEOUT_MS", "2000");
        cli.cmd.current_dir(self.path());
        cli
    }

    /// Register `rel` (created with one file) with `README.md` as its
    /// artifact. Returns the project id.
    pub fn add_project(&self, name: &str, rel: &str) -> String {
        self.file(&format!("{rel}/intro.md"), "# Intro\n");
        let run = self
            .tw()
            .args(["--json", "project", "add", name])
            .args([self.abs(rel), self.abs(&format!("{rel}/README.md"))])
            .passes();
        run.json()["id"].as_str().unwrap().to_string()
    }

    /// Pids listed in the liveness records.
    pub fn worker_pids(&self) -> Vec<i32> {
        let Ok(entries) = fs::read_dir(self.state().join("workers")) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter_map(|e| e.path().file_stem()?.to_str()?.parse().ok())
            .collect()
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        for pid in self.worker_pids() {
            let _ = kill(Pid::from_raw(pid), Signal::SIGKILL);
        }
    }
}
