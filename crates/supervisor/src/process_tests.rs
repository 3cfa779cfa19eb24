// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::process::Command;
use tempfile::tempdir;

fn exited_pid() -> i32 {
    let mut child = Command::new("true").spawn().unwrap();
    let pid = child.id() as i32;
    child.wait().unwrap();
    pid
}

#[test]
fn own_process_is_alive() {
    assert!(WorkerHandle::new(std::process::id() as i32).is_alive());
}

#[test]
fn reaped_process_is_dead() {
    assert!(!WorkerHandle::new(exited_pid()).is_alive());
    assert!(!WorkerHandle::new(0).is_alive());
    assert!(!WorkerHandle::new(-1).is_alive());
}

#[test]
fn signalling_a_gone_process_succeeds() {
    let handle = WorkerHandle::new(exited_pid());
    handle.terminate().unwrap();
    assert!(handle.wait_for_exit(Duration::from_millis(10)));
}

#[cfg(target_os = "linux")]
#[test]
fn cmdline_guards_against_pid_reuse() {
    let mut child = Command::new("sleep").arg("30").spawn().unwrap();
    let handle = WorkerHandle::new(child.id() as i32);

    assert!(handle.runs_worker_for(&ProjectId::from_string("30")));
    assert!(!handle.runs_worker_for(&ProjectId::from_string("prj-other")));

    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn terminate_then_wait_reaps_child() {
    let child = Command::new("sleep").arg("30").spawn().unwrap();
    let handle = WorkerHandle::new(child.id() as i32);
    assert!(handle.is_alive());

    handle.terminate().unwrap();
    assert!(handle.wait_for_exit(Duration::from_secs(5)));
    assert!(!handle.is_alive());
}

#[test]
fn worker_args_carry_every_setting() {
    let command = WorkerCommand {
        bin: "/usr/bin/tw".into(),
        project: ProjectId::from_string("prj-abc"),
        root: "/w/docs".into(),
        outputs: vec!["/w/docs/README.md".into(), "/w/docs/TREE.md".into()],
        ignore: vec!["target".into()],
        exclude: vec!["/state".into()],
        state_dir: "/state".into(),
        cwd: "/state/scratch/prj-abc".into(),
        log: "/state/logs/prj-abc.log".into(),
    };

    assert_eq!(
        command.args(),
        vec![
            "watch",
            "--project",
            "prj-abc",
            "--root",
            "/w/docs",
            "--output",
            "/w/docs/README.md",
            "--output",
            "/w/docs/TREE.md",
            "--ignore",
            "target",
            "--exclude",
            "/state",
        ]
    );
}

#[test]
fn spawn_writes_output_to_log() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("logs/prj-abc.log");
    let command = WorkerCommand {
        bin: "echo".into(),
        project: ProjectId::from_string("prj-abc"),
        root: dir.path().into(),
        outputs: vec![dir.path().join("README.md")],
        ignore: vec![],
        exclude: vec![],
        state_dir: dir.path().into(),
        cwd: dir.path().into(),
        log: log.clone(),
    };

    let mut child = command.spawn().unwrap();
    assert!(child.wait().unwrap().success());

    let written = std::fs::read_to_string(&log).unwrap();
    assert!(written.starts_with("watch --project prj-abc --root"));
}
