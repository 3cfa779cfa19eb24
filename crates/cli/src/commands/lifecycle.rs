// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tw start` / `tw stop`

use anyhow::Result;
use serde_json::json;
use tw_supervisor::Supervisor;

use crate::output::{self, OutputFormat};

pub fn start(sup: &mut Supervisor, project: &str, format: OutputFormat) -> Result<()> {
    let handle = sup.start(project)?;
    let log = sup.config().log_path(&sup.project(project)?.id);
    let data = json!({ "project": project, "pid": handle.pid(), "log": log });
    output::format_or_json(format, &data, || {
        println!("Started '{project}' (pid {})", handle.pid());
    })
}

pub fn stop(sup: &mut Supervisor, project: &str, force: bool, format: OutputFormat) -> Result<()> {
    sup.stop(project, force)?;
    output::format_or_json(format, &json!({ "project": project, "stopped": true }), || {
        println!("Stopped '{project}'");
    })
}
