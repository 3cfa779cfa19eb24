// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn start_records_worker_and_renders_artifact() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");

    let handle = fx.sup.start("docs").unwrap();

    assert!(handle.is_alive());
    assert_eq!(fx.records(), vec![(handle.pid(), project.id.clone())]);
    let artifact = fs::read_to_string(&project.outputs[0]).unwrap();
    assert!(artifact.contains("<!-- AUTO_TREE_START -->"));
    assert!(artifact.contains("main.rs"));

    let view = status_of(&mut fx.sup, &project.id);
    assert_eq!(view.status, ProjectStatus::Running);
    assert_eq!(view.pid, Some(handle.pid()));
}

#[test]
fn start_twice_is_rejected() {
    let mut fx = Fixture::new();
    fx.add("docs");
    fx.sup.start("docs").unwrap();

    let err = fx.sup.start("docs").unwrap_err();
    assert!(matches!(err, SupervisorError::Invalid(ref m) if m.contains("already running")));
    assert_eq!(fx.records().len(), 1);
}

#[test]
fn start_with_missing_root_fails_without_spawning() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    fs::remove_dir_all(&project.root).unwrap();

    assert!(matches!(fx.sup.start("docs"), Err(SupervisorError::Invalid(_))));
    assert!(fx.records().is_empty());
}

#[test]
fn start_with_missing_binary_is_a_spawn_error() {
    let fx = Fixture::new();
    fx.add("docs");
    let mut config = fx.sup.config().clone();
    config.worker_bin = fx.dir.path().join("bin/missing");
    let mut sup = Supervisor::new(config);

    assert!(matches!(sup.start("docs"), Err(SupervisorError::Spawn(_))));
    assert!(fx.records().is_empty());
}

#[test]
fn stop_terminates_worker_and_removes_record() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let handle = fx.sup.start("docs").unwrap();

    fx.sup.stop("docs", false).unwrap();

    assert!(fx.records().is_empty());
    assert!(!handle.is_alive());
    assert_eq!(status_of(&mut fx.sup, &project.id).status, ProjectStatus::Stopped);
}

#[test]
fn stop_without_worker_is_invalid() {
    let mut fx = Fixture::new();
    fx.add("docs");
    assert!(matches!(fx.sup.stop("docs", false), Err(SupervisorError::Invalid(_))));
}

#[test]
fn census_is_idempotent_across_invocations() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let handle = fx.sup.start("docs").unwrap();

    for _ in 0..2 {
        let mut sup = fx.fresh();
        sup.census().unwrap();
        assert_eq!(sup.running().get(&project.id), Some(&handle));
        assert_eq!(fx.records().len(), 1);
    }

    // A fresh invocation can stop a worker it did not spawn
    fx.fresh().stop("docs", false).unwrap();
    assert!(handle.wait_for_exit(Duration::from_secs(3)));
}

#[test]
fn census_drops_records_of_dead_processes() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let mut child = std::process::Command::new("true").spawn().unwrap();
    let dead = child.id() as i32;
    child.wait().unwrap();
    LivenessRecords::new(&fx.sup.config().workers_dir).write(dead, &project.id).unwrap();

    fx.sup.census().unwrap();

    assert!(fx.sup.running().is_empty());
    assert!(fx.records().is_empty());
}

#[test]
fn census_drops_records_whose_pid_was_reused() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    // Our own pid is alive but is not a worker for this project
    let ours = std::process::id() as i32;
    LivenessRecords::new(&fx.sup.config().workers_dir).write(ours, &project.id).unwrap();

    fx.sup.census().unwrap();

    assert!(fx.records().is_empty());
}

/// A live process whose pid was recorded for `project` but which is not
/// its worker.
fn stranger(fx: &Fixture, project: &Project) -> std::process::Child {
    let child = std::process::Command::new("sleep").arg("30").spawn().unwrap();
    LivenessRecords::new(&fx.sup.config().workers_dir)
        .write(child.id() as i32, &project.id)
        .unwrap();
    child
}

#[test]
fn force_stop_leaves_reused_pid_alone() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let mut child = stranger(&fx, &project);

    let result = fx.sup.stop("docs", true);

    assert!(matches!(result, Err(SupervisorError::Invalid(ref m)) if m.contains("not running")));
    assert!(fx.records().is_empty());
    assert!(child.try_wait().unwrap().is_none());
    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn delete_leaves_reused_pid_alone() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let mut child = stranger(&fx, &project);

    fx.sup.delete("docs").unwrap();

    assert!(fx.records().is_empty());
    assert!(child.try_wait().unwrap().is_none());
    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn list_marks_vanished_root_invalid_and_stops_worker() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let handle = fx.sup.start("docs").unwrap();
    fs::remove_dir_all(&project.root).unwrap();

    let view = status_of(&mut fx.sup, &project.id);

    assert_eq!(view.status, ProjectStatus::InvalidPath);
    assert_eq!(view.pid, None);
    assert!(fx.records().is_empty());
    assert!(!handle.is_alive());
}

#[test]
fn edit_root_restarts_running_worker() {
    let mut fx = Fixture::new();
    fx.add("docs");
    let before = fx.sup.start("docs").unwrap();
    let moved = fx.tree("moved");

    fx.sup.edit("docs", Edit::Root(s(&moved))).unwrap();

    let records = fx.records();
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].0, before.pid());
    assert!(!before.is_alive());
}

#[test]
fn reload_kills_worker_that_ignores_sigterm() {
    let mut fx = Fixture::with_worker(STUBBORN_WORKER_SCRIPT);
    let mut config = fx.sup.config().clone();
    config.stop_grace = Duration::from_millis(300);
    fx.sup = Supervisor::new(config);
    fx.add("docs");
    let before = fx.sup.start("docs").unwrap();
    let moved = fx.tree("moved");

    fx.sup.edit("docs", Edit::Root(s(&moved))).unwrap();

    assert!(!before.is_alive());
    let records = fx.records();
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].0, before.pid());
}
