// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tw project` — registry management.

use anyhow::Result;
use clap::{Args, Subcommand};
use tw_supervisor::{Edit, Supervisor};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List projects with their current status
    List {},
    /// Register a tree and the artifact generated from it
    Add {
        name: String,
        /// Directory to watch
        root: String,
        /// File the listing is written into
        output: String,
    },
    /// Change a project's name, root, or outputs
    Edit {
        /// Project id, name, or id prefix
        project: String,
        #[command(flatten)]
        field: EditField,
    },
    /// Add another artifact to a project
    AddOutput { project: String, output: String },
    /// Remove one of a project's artifacts
    RemoveOutput { project: String, output: String },
    /// Stop the worker and forget the project (artifacts are kept)
    Delete { project: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct EditField {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    root: Option<String>,
    /// Replaces every output; repeat for several
    #[arg(long = "output")]
    outputs: Vec<String>,
}

impl EditField {
    fn into_edit(self) -> Edit {
        match (self.name, self.root) {
            (Some(name), _) => Edit::Name(name),
            (None, Some(root)) => Edit::Root(root),
            (None, None) => Edit::Outputs(self.outputs),
        }
    }
}

pub fn handle(sup: &mut Supervisor, command: ProjectCommand, format: OutputFormat) -> Result<()> {
    match command {
        ProjectCommand::List {} => {
            let views = sup.list()?;
            output::handle_list(format, &views, "No projects registered", output::write_projects)
        }
        ProjectCommand::Add { name, root, output } => {
            let project = sup.add(&name, &root, &output)?;
            output::format_or_json(format, &project, || {
                println!("Added project '{}' ({})", project.name, project.id);
            })
        }
        ProjectCommand::Edit { project, field } => {
            let project = sup.edit(&project, field.into_edit())?;
            output::format_or_json(format, &project, || {
                println!("Updated project '{}'", project.name);
            })
        }
        ProjectCommand::AddOutput { project, output } => {
            let project = sup.add_output(&project, &output)?;
            output::format_or_json(format, &project, || {
                println!("'{}' now writes {} output(s)", project.name, project.outputs.len());
            })
        }
        ProjectCommand::RemoveOutput { project, output } => {
            let project = sup.remove_output(&project, &output)?;
            output::format_or_json(format, &project, || {
                println!("'{}' now writes {} output(s)", project.name, project.outputs.len());
            })
        }
        ProjectCommand::Delete { project } => {
            let project = sup.delete(&project)?;
            output::format_or_json(format, &project, || {
                println!("Deleted project '{}'", project.name);
            })
        }
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
