// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ignore_defaults_to_empty_when_absent() {
    let json = r#"{"id":"prj-1","name":"Docs","root":"/tmp/proj","outputs":["/tmp/out.md"]}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert!(project.ignore.is_empty());
    assert!(project.owns_output(Path::new("/tmp/out.md")));
    assert!(!project.owns_output(Path::new("/tmp/other.md")));
}

#[yare::parameterized(
    stopped      = { ProjectStatus::Stopped,     "stopped" },
    running      = { ProjectStatus::Running,     "running" },
    invalid_path = { ProjectStatus::InvalidPath, "invalid_path" },
    muting       = { ProjectStatus::Muting,      "muting" },
)]
fn status_display_matches_serde(status: ProjectStatus, expected: &str) {
    assert_eq!(status.to_string(), expected);
    assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{expected}\""));
}

#[test]
fn view_flattens_project_fields() {
    let project = Project::new("Docs", "/tmp/proj".into(), "/tmp/out.md".into());
    let view = ProjectView { project, status: ProjectStatus::Running, pid: Some(42) };
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["name"], "Docs");
    assert_eq!(value["status"], "running");
    assert_eq!(value["pid"], 42);
}
