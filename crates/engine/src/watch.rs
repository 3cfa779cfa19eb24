// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The watch loop run by each per-project worker process.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tw_core::{Clock, ProjectId};
use tw_storage::{Gateway, GatewayError, Json};

use crate::source::ChangeSource;
use crate::throttle::{Decision, Throttler};

/// Longest uninterrupted sleep, so a stop request is noticed promptly.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to scan watched tree: {0}")]
    Scan(#[from] io::Error),

    #[error("failed to persist mute record: {0}")]
    MuteRecord(#[from] GatewayError),
}

/// Rebuilds a project's artifacts after admitted changes.
pub trait Regenerate {
    /// Failures are logged by the implementation, never returned.
    fn regenerate(&mut self, project: &ProjectId);
}

/// Re-invokes an executable as `<exe> update <project-id>`.
pub struct SelfInvoke {
    exe: PathBuf,
}

impl SelfInvoke {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Invoke the currently running executable.
    pub fn current() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }
}

impl Regenerate for SelfInvoke {
    fn regenerate(&mut self, project: &ProjectId) {
        let started = Instant::now();
        match Command::new(&self.exe).args(["update", project.as_str()]).output() {
            Ok(out) if out.status.success() => {
                tracing::info!(
                    project = %project,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "regenerated artifacts"
                );
            }
            Ok(out) => {
                tracing::warn!(
                    project = %project,
                    status = %out.status,
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "regeneration failed"
                );
            }
            Err(e) => {
                tracing::warn!(project = %project, error = %e, "failed to run regeneration");
            }
        }
    }
}

/// Outcome of one watch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub admitted: usize,
    pub suppressed: usize,
    pub mutes_written: bool,
}

pub struct WatchWorker<S, R, C: Clock> {
    project: ProjectId,
    source: S,
    regenerate: R,
    throttler: Throttler<C>,
    gateway: Gateway,
    mute_record: PathBuf,
    /// Mute set as last persisted
    persisted: BTreeSet<PathBuf>,
}

impl<S, R, C> WatchWorker<S, R, C>
where
    S: ChangeSource,
    R: Regenerate,
    C: Clock,
{
    pub fn new(
        project: ProjectId,
        source: S,
        regenerate: R,
        throttler: Throttler<C>,
        gateway: Gateway,
        mute_record: PathBuf,
    ) -> Self {
        Self {
            project,
            source,
            regenerate,
            throttler,
            gateway,
            mute_record,
            persisted: BTreeSet::new(),
        }
    }

    pub fn throttler(&self) -> &Throttler<C> {
        &self.throttler
    }

    /// Poll once, throttle, persist mutes, and regenerate if anything got through.
    pub fn cycle(&mut self) -> Result<CycleReport, WatchError> {
        let events = self.source.poll()?;
        let mut report = CycleReport::default();

        for event in &events {
            match self.throttler.observe(event) {
                Decision::Admit => {
                    report.admitted += 1;
                    tracing::info!(
                        project = %self.project,
                        path = %event.path.display(),
                        kind = %event.kind,
                        "change detected"
                    );
                }
                Decision::Suppress(reason) => {
                    report.suppressed += 1;
                    tracing::debug!(
                        project = %self.project,
                        path = %event.path.display(),
                        %reason,
                        "change suppressed"
                    );
                }
            }
        }

        // A failed mute write is retried next cycle; admitted changes are
        // already out of the snapshot, so regeneration runs regardless.
        let persisted = if self.throttler.muted() != &self.persisted {
            self.persist_mutes().map(|()| true)
        } else {
            Ok(false)
        };
        if report.admitted > 0 {
            self.regenerate.regenerate(&self.project);
        }
        report.mutes_written = persisted?;
        Ok(report)
    }

    fn persist_mutes(&mut self) -> Result<(), GatewayError> {
        let muted = self.throttler.muted().clone();
        tracing::warn!(
            project = %self.project,
            count = muted.len(),
            paths = ?muted,
            "mute set changed"
        );
        let list: Vec<PathBuf> = muted.iter().cloned().collect();
        self.gateway
            .transact::<Json<Vec<PathBuf>>, GatewayError, _>(&self.mute_record, |_| Ok(list))?;
        self.persisted = muted;
        Ok(())
    }

    /// Run cycles every `interval` until `stop` is raised.
    ///
    /// Cycle failures are logged and the loop carries on; a vanished root
    /// may come back.
    pub fn run(&mut self, interval: Duration, stop: &AtomicBool) {
        let interval_ms = interval.as_millis() as u64;
        tracing::info!(project = %self.project, interval_ms, "watching");
        while sleep_unless_stopped(interval, stop) {
            if let Err(e) = self.cycle() {
                tracing::warn!(project = %self.project, error = %e, "watch cycle failed");
            }
        }
        tracing::info!(project = %self.project, "stop requested, exiting");
    }
}

/// Sleep for `total`, returning false early if `stop` is raised.
fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}

/// Install the worker's signal dispositions.
///
/// SIGTERM raises the returned flag. SIGINT is swallowed so an interactive
/// interrupt aimed at the terminal never takes the worker down.
pub fn install_stop_flag() -> io::Result<Arc<AtomicBool>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&stop))?;
    signal_hook::flag::register(SIGINT, Arc::new(AtomicBool::new(false)))?;
    Ok(stop)
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
