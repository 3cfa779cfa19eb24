// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ignore names: left out of listings and ignored by the watcher.

use anyhow::Result;
use clap::{Args, Subcommand};
use tw_supervisor::Supervisor;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct IgnoreArgs {
    #[command(subcommand)]
    pub command: IgnoreCommand,
}

#[derive(Subcommand)]
pub enum IgnoreCommand {
    /// Current ignore names
    List { project: String },
    /// Replace the ignore set (no names clears it)
    Set { project: String, names: Vec<String> },
    /// Names worth ignoring: the current ones plus top-level directories
    Candidates { project: String },
}

pub fn handle(sup: &mut Supervisor, command: IgnoreCommand, format: OutputFormat) -> Result<()> {
    let (names, empty_msg) = match command {
        IgnoreCommand::List { project } => (sup.ignore_list(&project)?, "No ignore names"),
        IgnoreCommand::Set { project, names } => {
            (sup.ignore_set(&project, &names)?, "Ignore set cleared")
        }
        IgnoreCommand::Candidates { project } => {
            (sup.ignore_candidates(&project)?, "No candidates")
        }
    };
    let names: Vec<String> = names.into_iter().collect();
    output::handle_list(format, &names, empty_msg, output::write_lines)
}
