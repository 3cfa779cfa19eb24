// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tw update` — regenerate artifacts now.

use anyhow::{bail, Result};
use clap::Args;
use tw_supervisor::Supervisor;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct UpdateArgs {
    /// Registered project (id, name, or id prefix)
    #[arg(conflicts_with_all = ["root", "output", "ignore"])]
    pub project: Option<String>,
    /// Render an unregistered tree
    #[arg(long, requires = "output")]
    pub root: Option<String>,
    /// Artifact for `--root`
    #[arg(long, requires = "root")]
    pub output: Option<String>,
    /// Entry names to leave out, with `--root`
    #[arg(long)]
    pub ignore: Vec<String>,
}

pub fn handle(sup: &Supervisor, args: UpdateArgs, format: OutputFormat) -> Result<()> {
    let written = match (args.project, args.root, args.output) {
        (Some(project), _, _) => sup.update(&project)?,
        (None, Some(root), Some(output)) => vec![sup.update_direct(&root, &output, &args.ignore)?],
        _ => bail!("give a project, or --root and --output"),
    };
    output::handle_list(format, &written, "Nothing to update", |paths, out| {
        let shown: Vec<_> = paths.iter().map(|p| format!("Updated {}", p.display())).collect();
        output::write_lines(&shown, out)
    })
}
