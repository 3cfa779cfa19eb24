//! Project registry specs
//!
//! Verify add / edit / outputs / delete through the command line.

use crate::prelude::*;

#[test]
fn added_project_is_listed_as_stopped() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");

    sandbox
        .tw()
        .args(["project", "list"])
        .passes()
        .stdout_has(&id)
        .stdout_has("Docs")
        .stdout_has("stopped")
        .stdout_has(&sandbox.abs("docs/README.md"));

    let listed = sandbox.tw().args(["--json", "project", "list"]).passes().json();
    assert_eq!(listed[0]["status"], "stopped");
    assert_eq!(listed[0]["root"], sandbox.abs("docs"));
}

#[test]
fn empty_registry_lists_nothing() {
    let sandbox = Sandbox::new();
    sandbox.tw().args(["project", "list"]).passes().stdout_has("No projects registered");
}

#[test]
fn duplicate_names_are_rejected() {
    let sandbox = Sandbox::new();
    sandbox.add_project("Docs", "docs");
    sandbox.file("other/a.md", "");

    sandbox
        .tw()
        .args(["project", "add", "Docs"])
        .args([sandbox.abs("other"), sandbox.abs("other/README.md")])
        .fails_with(1)
        .stderr_has("already exists");
}

#[test]
fn outputs_are_added_and_removed_but_one_remains() {
    let sandbox = Sandbox::new();
    sandbox.add_project("Docs", "docs");

    sandbox
        .tw()
        .args(["project", "add-output", "Docs", &sandbox.abs("docs/TREE.md")])
        .passes()
        .stdout_has("2 output(s)");
    sandbox
        .tw()
        .args(["project", "remove-output", "Docs", &sandbox.abs("docs/README.md")])
        .passes()
        .stdout_has("1 output(s)");
    sandbox
        .tw()
        .args(["project", "remove-output", "Docs", &sandbox.abs("docs/TREE.md")])
        .fails_with(1)
        .stderr_has("at least one output");
}

#[test]
fn edit_renames_and_delete_forgets() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");

    sandbox.tw().args(["project", "edit", &id, "--name", "Handbook"]).passes();
    sandbox.tw().args(["project", "list"]).passes().stdout_has("Handbook");

    sandbox.tw().args(["project", "delete", "Handbook"]).passes().stdout_has("Deleted");
    sandbox.tw().args(["project", "list"]).passes().stdout_has("No projects registered");
}
