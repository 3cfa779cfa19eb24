// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_or_invalid_mute_record_reads_as_empty() {
    let fx = Fixture::new();
    let project = fx.add("docs");
    assert!(fx.sup.mutes("docs").unwrap().is_empty());

    let record = fx.sup.config().mute_record(&project.id);
    fs::create_dir_all(record.parent().unwrap()).unwrap();
    fs::write(&record, "not json").unwrap();
    assert!(fx.sup.mutes("docs").unwrap().is_empty());
}

#[test]
fn non_empty_mutes_mark_project_muting() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    fx.write_mutes(&project.id, &[&project.root.join("src")]);

    assert_eq!(fx.sup.mutes("docs").unwrap(), vec![project.root.join("src")]);
    assert_eq!(status_of(&mut fx.sup, &project.id).status, ProjectStatus::Muting);

    fx.write_mutes(&project.id, &[]);
    assert_eq!(status_of(&mut fx.sup, &project.id).status, ProjectStatus::Stopped);
}

#[test]
fn promote_turns_mutes_into_ignore_names() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    fx.sup.ignore_set("docs", &["target".to_string()]).unwrap();
    fx.write_mutes(
        &project.id,
        &[
            &project.root.join("node_modules"),
            &project.root.join("build/out.log"),
            &project.root.join("target"),
        ],
    );

    let added = fx.sup.promote_mutes("docs").unwrap();

    assert_eq!(added.into_iter().collect::<Vec<_>>(), vec!["build", "node_modules"]);
    assert_eq!(
        fx.sup.ignore_list("docs").unwrap().into_iter().collect::<Vec<_>>(),
        vec!["build", "node_modules", "target"]
    );
    assert!(!fx.sup.config().mute_record(&project.id).exists());
    assert!(fx.sup.promote_mutes("docs").unwrap().is_empty());
}

#[test]
fn promote_restarts_running_worker() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let before = fx.sup.start("docs").unwrap();
    fx.write_mutes(&project.id, &[&project.root.join("src")]);

    fx.sup.promote_mutes("docs").unwrap();

    let records = fx.records();
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].0, before.pid());
    let artifact = fs::read_to_string(&project.outputs[0]).unwrap();
    assert!(!artifact.contains("main.rs"));
}

#[test]
fn ignore_set_validates_and_replaces() {
    let mut fx = Fixture::new();
    fx.add("docs");

    let set = fx.sup.ignore_set("docs", &["b".into(), " a ".into(), "".into()]).unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(fx.sup.ignore_set("docs", &["a/b".into()]).is_err());

    fx.sup.ignore_set("docs", &[]).unwrap();
    assert!(fx.sup.ignore_list("docs").unwrap().is_empty());
}

#[test]
fn ignore_candidates_include_top_level_dirs() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    fs::create_dir_all(project.root.join(".git")).unwrap();
    fs::create_dir_all(project.root.join("node_modules")).unwrap();
    fx.sup.ignore_set("docs", &["dist".into()]).unwrap();

    let candidates = fx.sup.ignore_candidates("docs").unwrap();

    assert_eq!(candidates.into_iter().collect::<Vec<_>>(), vec!["dist", "node_modules", "src"]);
}
