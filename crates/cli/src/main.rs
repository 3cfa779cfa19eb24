// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw: keep annotated directory listings in sync with the trees they describe

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use std::panic;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tw_supervisor::{Config, Supervisor};

use crate::commands::{ignore, lifecycle, mute, project, update, watch};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(name = "tw", version = VERSION, styles = color::styles())]
#[command(about = "Keep annotated directory listings in sync with the trees they describe")]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage registered projects
    Project(project::ProjectArgs),
    /// Start a project's watch worker
    Start {
        /// Project id, name, or id prefix
        project: String,
    },
    /// Stop a project's watch worker
    Stop {
        project: String,
        /// Kill the worker if it outlives the grace period
        #[arg(long)]
        force: bool,
    },
    /// Regenerate artifacts now
    Update(update::UpdateArgs),
    /// Paths a worker stopped reacting to
    Mute(mute::MuteArgs),
    /// Entry names left out of listings
    Ignore(ignore::IgnoreArgs),
    #[command(hide = true)]
    Watch(watch::WatchArgs),
}

/// Every command but `watch` runs as a short-lived supervisor invocation.
fn supervisor() -> Result<Supervisor> {
    logging::init_command();
    Ok(Supervisor::new(Config::load()?))
}

fn run(cli: Cli) -> Result<()> {
    let format = OutputFormat::from_flag(cli.json);
    match cli.command {
        Command::Project(args) => project::handle(&mut supervisor()?, args.command, format),
        Command::Start { project } => lifecycle::start(&mut supervisor()?, &project, format),
        Command::Stop { project, force } => {
            lifecycle::stop(&mut supervisor()?, &project, force, format)
        }
        Command::Update(args) => update::handle(&supervisor()?, args, format),
        Command::Mute(args) => mute::handle(&mut supervisor()?, args.command, format),
        Command::Ignore(args) => ignore::handle(&mut supervisor()?, args.command, format),
        Command::Watch(args) => watch::run(args),
    }
}

fn main() {
    let cli = Cli::parse();
    let code = match panic::catch_unwind(move || run(cli)) {
        Ok(Ok(())) => 0,
        Ok(Err(err)) => {
            let exit = ExitError::from(err);
            eprintln!("error: {exit}");
            exit.code
        }
        Err(_) => {
            eprintln!("error: internal failure (this is a bug)");
            exit_error::INTERNAL
        }
    };
    std::process::exit(code);
}
