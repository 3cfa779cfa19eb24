// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mute commands: inspect and promote paths a worker stopped reacting to.

use anyhow::Result;
use clap::{Args, Subcommand};
use tw_supervisor::Supervisor;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct MuteArgs {
    #[command(subcommand)]
    pub command: MuteCommand,
}

#[derive(Subcommand)]
pub enum MuteCommand {
    /// Paths currently muted by the project's worker
    List { project: String },
    /// Add the muted paths' names to the ignore set and clear the mutes
    Promote { project: String },
}

pub fn handle(sup: &mut Supervisor, command: MuteCommand, format: OutputFormat) -> Result<()> {
    match command {
        MuteCommand::List { project } => {
            let mutes = sup.mutes(&project)?;
            output::handle_list(format, &mutes, "No muted paths", |paths, out| {
                let shown: Vec<_> = paths.iter().map(|p| p.display()).collect();
                output::write_lines(&shown, out)
            })
        }
        MuteCommand::Promote { project } => {
            let added: Vec<String> = sup.promote_mutes(&project)?.into_iter().collect();
            output::handle_list(format, &added, "No new ignore names", |names, out| {
                let shown: Vec<_> = names.iter().map(|n| format!("Ignoring {n}")).collect();
                output::write_lines(&shown, out)
            })
        }
    }
}
