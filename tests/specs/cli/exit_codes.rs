//! Exit code specs
//!
//! 0 on success, 1 with a reason on failure, 10 when the registry had to be
//! restored and the command must be retried.

use crate::prelude::*;

#[test]
fn validation_failure_exits_1_with_reason() {
    let sandbox = Sandbox::new();
    sandbox
        .tw()
        .args(["project", "add", "Docs", "relative/dir", "/tmp/README.md"])
        .fails_with(1)
        .stderr_has("absolute");
}

#[test]
fn unknown_project_exits_1() {
    let sandbox = Sandbox::new();
    sandbox.tw().args(["start", "nope"]).fails_with(1).stderr_has("no project matches 'nope'");
}

#[test]
fn restored_registry_exits_10_and_applies_nothing() {
    let sandbox = Sandbox::new();
    let docs = sandbox.add_project("Docs", "docs");
    sandbox.add_project("Site", "site");
    sandbox.file("state/registry.json", "{ truncated");
    sandbox.file("third/intro.md", "");

    sandbox
        .tw()
        .args(["project", "add", "Third"])
        .args([sandbox.abs("third"), sandbox.abs("third/README.md")])
        .fails_with(10)
        .stderr_has("retry");

    let listed = sandbox.tw().args(["--json", "project", "list"]).passes().json();
    let ids: Vec<&str> = listed.as_array().unwrap().iter().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, vec![docs.as_str()]);

    // The retry goes through
    sandbox
        .tw()
        .args(["project", "add", "Third"])
        .args([sandbox.abs("third"), sandbox.abs("third/README.md")])
        .passes();
}
