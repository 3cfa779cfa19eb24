// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serde::Serialize;
use tw_core::ProjectView;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Render a list as text or JSON. Handles the empty case for text.
pub fn handle_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    empty_msg: &str,
    render_text: impl FnOnce(&[T], &mut dyn Write) -> std::io::Result<()>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{empty_msg}");
            } else {
                render_text(items, &mut std::io::stdout())?;
            }
        }
    }
    Ok(())
}

/// Format-branch helper for single results.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => text_fn(),
    }
    Ok(())
}

/// One line per project: name, status, pid, root, outputs.
pub fn write_projects(views: &[ProjectView], out: &mut dyn Write) -> std::io::Result<()> {
    let name_w = views.iter().map(|v| v.project.name.len()).max().unwrap_or(0).max(4);
    let status_w = views.iter().map(|v| v.status.to_string().len()).max().unwrap_or(0).max(6);
    let id_w = views.iter().map(|v| v.project.id.as_str().len()).max().unwrap_or(0).max(2);

    writeln!(
        out,
        "{}  {}  {}  {:>7}  {}",
        color::header(&format!("{:<id_w$}", "ID")),
        color::header(&format!("{:<name_w$}", "NAME")),
        color::header(&format!("{:<status_w$}", "STATUS")),
        color::header("PID"),
        color::header("ROOT"),
    )?;
    for view in views {
        let pid = view.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<id_w$}  {:<name_w$}  {}  {:>7}  {}",
            view.project.id.as_str(),
            view.project.name,
            color::status(view.status, status_w),
            pid,
            view.project.root.display(),
        )?;
        for output in &view.project.outputs {
            writeln!(out, "{:id_w$}  {}", "", color::muted(&format!("→ {}", output.display())))?;
        }
    }
    Ok(())
}

/// One item per line.
pub fn write_lines<T: std::fmt::Display>(items: &[T], out: &mut dyn Write) -> std::io::Result<()> {
    for item in items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}
