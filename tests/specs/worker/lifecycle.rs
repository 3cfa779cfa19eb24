//! Worker lifecycle specs
//!
//! Verify a started worker keeps the artifact in sync and stops cleanly.

use crate::prelude::*;

fn started(sandbox: &Sandbox, id: &str) -> i32 {
    let run = sandbox.tw().args(["--json", "start", "Docs"]).passes().json();
    let pid = run["pid"].as_i64().unwrap() as i32;
    // The worker's first scan must have happened before the tree changes
    let log = format!("state/logs/{id}.log");
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || sandbox.read(&log).contains("watching")),
        "worker never started watching:\n{}",
        sandbox.read(&log)
    );
    pid
}

#[test]
fn worker_keeps_artifact_in_sync_until_stopped() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");

    let pid = started(&sandbox, &id);
    assert!(sandbox.read("docs/README.md").contains("intro.md"));
    assert_eq!(sandbox.worker_pids(), vec![pid]);
    sandbox.tw().args(["project", "list"]).passes().stdout_has("running");

    sandbox.file("docs/guide.md", "# Guide\n");
    let synced = wait_for(SPEC_WAIT_MAX_MS, || sandbox.read("docs/README.md").contains("guide.md"));
    assert!(synced, "artifact never picked up the new file");

    sandbox.tw().args(["stop", "Docs"]).passes().stdout_has("Stopped");
    assert!(sandbox.worker_pids().is_empty());
    assert!(wait_for(SPEC_WAIT_MAX_MS, || process_gone(pid)));
    sandbox.tw().args(["project", "list"]).passes().stdout_has("stopped");
}

#[test]
fn starting_twice_is_rejected() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");
    started(&sandbox, &id);

    sandbox.tw().args(["start", "Docs"]).fails_with(1).stderr_has("already running");
    assert_eq!(sandbox.worker_pids().len(), 1);
    sandbox.tw().args(["stop", "Docs"]).passes();
}

#[test]
fn stopping_a_stopped_project_fails() {
    let sandbox = Sandbox::new();
    sandbox.add_project("Docs", "docs");
    sandbox.tw().args(["stop", "Docs"]).fails_with(1).stderr_has("not running");
}

#[test]
fn deleting_a_running_project_stops_its_worker() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");
    let pid = started(&sandbox, &id);

    sandbox.tw().args(["project", "delete", "Docs"]).passes();

    assert!(sandbox.worker_pids().is_empty());
    assert!(wait_for(SPEC_WAIT_MAX_MS, || process_gone(pid)));
    assert!(!sandbox.state().join(format!("logs/{id}.log")).exists());
}
