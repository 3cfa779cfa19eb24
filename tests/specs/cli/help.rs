//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn tw_help_shows_usage() {
    cli().args(["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn tw_without_a_command_shows_usage_and_fails() {
    cli().fails_with(2).stderr_has("Usage:");
}

#[test]
fn tw_help_lists_commands_but_not_the_worker_entry_point() {
    let run = cli()
        .args(["--help"])
        .passes()
        .stdout_has("project")
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("update")
        .stdout_has("mute")
        .stdout_has("ignore");
    assert!(!run.stdout().lines().any(|l| l.trim_start().starts_with("watch")));
}

#[test]
fn tw_project_help_shows_subcommands() {
    cli()
        .args(["project", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("add")
        .stdout_has("edit")
        .stdout_has("add-output")
        .stdout_has("remove-output")
        .stdout_has("delete");
}

#[test]
fn tw_version_shows_version() {
    cli().args(["--version"]).passes().stdout_has("0.1");
}
