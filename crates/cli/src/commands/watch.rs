// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-project worker. Spawned by `tw start`, not meant
//! to be run by hand.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tw_core::{ProjectId, SystemClock};
use tw_engine::{
    install_stop_flag, PollingSource, SelfInvoke, ThrottleConfig, Throttler, WatchWorker,
};
use tw_supervisor::Config;

use crate::logging;

#[derive(Args)]
pub struct WatchArgs {
    #[arg(long)]
    pub project: String,
    #[arg(long)]
    pub root: PathBuf,
    #[arg(long = "output", required = true)]
    pub outputs: Vec<PathBuf>,
    #[arg(long)]
    pub ignore: Vec<String>,
    /// Paths never reported as changes
    #[arg(long)]
    pub exclude: Vec<PathBuf>,
}

impl WatchArgs {
    /// Outputs and excluded paths; changes to them never trigger a cycle.
    fn skipped(&self) -> Vec<PathBuf> {
        self.outputs.iter().chain(&self.exclude).cloned().collect()
    }
}

pub fn run(args: WatchArgs) -> Result<()> {
    let config = Config::load()?;
    let project = ProjectId::from_string(args.project.as_str());
    let _guard = logging::init_worker(&config.log_path(&project))
        .context("failed to open worker log")?;
    // Installed before the first scan so an early SIGTERM is not lost
    let stop = install_stop_flag().context("failed to install signal handlers")?;

    let ignore: BTreeSet<String> = args.ignore.iter().cloned().collect();
    let source = PollingSource::new(&args.root, ignore, args.skipped())
        .with_context(|| format!("failed to scan {}", args.root.display()))?;
    tracing::info!(
        project = %project,
        root = %args.root.display(),
        tracked = source.tracked(),
        "initial snapshot taken"
    );

    let regenerate = SelfInvoke::current().context("failed to locate own executable")?;
    let throttler = Throttler::new(ThrottleConfig::default(), SystemClock);
    let mute_record = config.mute_record(&project);
    let mut worker =
        WatchWorker::new(project, source, regenerate, throttler, config.gateway(), mute_record);
    worker.run(config.poll_interval, &stop);
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
