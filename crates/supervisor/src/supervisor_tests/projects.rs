// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn add_normalizes_and_persists() {
    let fx = Fixture::new();
    let root = fx.tree("docs");

    let project = fx
        .sup
        .add(" Docs ", &format!("\"{}/\"", s(&root)), &format!(" {}//README.md", s(&root)))
        .unwrap();

    assert_eq!(project.name, "Docs");
    assert_eq!(project.root, root);
    assert_eq!(project.outputs, vec![root.join("README.md")]);
    assert!(project.id.as_str().starts_with("prj-"));
    assert_eq!(fx.fresh().projects().unwrap(), vec![project]);
}

#[test]
fn add_rejects_duplicates() {
    let fx = Fixture::new();
    let docs = fx.add("docs");
    let other = fx.tree("other");

    let dup_name = fx.sup.add("docs", &s(&other), &s(&other.join("README.md")));
    let dup_root = fx.sup.add("other", &s(&docs.root), &s(&other.join("README.md")));
    let dup_output = fx.sup.add("other", &s(&other), &s(&docs.outputs[0]));

    for result in [dup_name, dup_root, dup_output] {
        assert!(matches!(result, Err(SupervisorError::Invalid(_))));
    }
    assert_eq!(fx.sup.projects().unwrap().len(), 1);
}

#[test]
fn add_rejects_paths_inside_state_dir() {
    let fx = Fixture::new();
    let root = fx.tree("docs");
    let inside = fx.sup.config().state_dir.join("logs");
    fs::create_dir_all(&inside).unwrap();

    assert!(fx.sup.add("a", &s(&inside), &s(&root.join("README.md"))).is_err());
    assert!(fx.sup.add("b", &s(&root), &s(&inside.join("README.md"))).is_err());
}

#[test]
fn lookup_by_id_prefix() {
    let fx = Fixture::new();
    let project = fx.add("docs");
    let prefix = &project.id.as_str()[..8];

    assert_eq!(fx.sup.project(prefix).unwrap().id, project.id);
    assert_eq!(fx.sup.project("docs").unwrap().id, project.id);
    assert!(fx.sup.project("nope").is_err());
}

#[test]
fn edit_fields() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let moved = fx.tree("moved");

    let renamed = fx.sup.edit("docs", Edit::Name("Handbook".into())).unwrap();
    assert_eq!(renamed.name, "Handbook");

    let rerooted = fx.sup.edit("Handbook", Edit::Root(s(&moved))).unwrap();
    assert_eq!(rerooted.root, moved);

    let outputs = vec![s(&moved.join("A.md")), s(&moved.join("B.md")), s(&moved.join("A.md"))];
    let edited = fx.sup.edit(project.id.as_str(), Edit::Outputs(outputs)).unwrap();
    assert_eq!(edited.outputs, vec![moved.join("A.md"), moved.join("B.md")]);

    assert!(fx.sup.edit("Handbook", Edit::Outputs(vec![])).is_err());
    assert!(fx.sup.edit("Handbook", Edit::Name("  ".into())).is_err());
}

#[test]
fn edit_rejects_conflicts_with_other_projects() {
    let mut fx = Fixture::new();
    let docs = fx.add("docs");
    fx.add("site");

    assert!(fx.sup.edit("site", Edit::Name("docs".into())).is_err());
    assert!(fx.sup.edit("site", Edit::Root(s(&docs.root))).is_err());
    assert!(fx.sup.edit("site", Edit::Outputs(vec![s(&docs.outputs[0])])).is_err());
    // Keeping one's own value is not a conflict
    assert!(fx.sup.edit("docs", Edit::Name("docs".into())).is_ok());
}

#[test]
fn outputs_can_be_added_and_removed_but_never_emptied() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let extra = project.root.join("TREE.md");

    let added = fx.sup.add_output("docs", &s(&extra)).unwrap();
    assert_eq!(added.outputs, vec![project.outputs[0].clone(), extra.clone()]);
    assert!(fx.sup.add_output("docs", &s(&extra)).is_err());

    let removed = fx.sup.remove_output("docs", &s(&project.outputs[0])).unwrap();
    assert_eq!(removed.outputs, vec![extra.clone()]);

    let err = fx.sup.remove_output("docs", &s(&extra)).unwrap_err();
    assert!(err.to_string().contains("at least one output"));
    assert!(fx.sup.remove_output("docs", "/not/an/output.md").is_err());
}

#[test]
fn delete_cascades_through_state_dir() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let handle = fx.sup.start("docs").unwrap();
    fx.write_mutes(&project.id, &[&project.root.join("src")]);
    let config = fx.sup.config().clone();
    assert!(config.scratch(&project.id).is_dir());

    fx.sup.delete("docs").unwrap();

    assert!(fx.sup.projects().unwrap().is_empty());
    assert!(fx.records().is_empty());
    assert!(!handle.is_alive());
    assert!(!config.mute_record(&project.id).exists());
    assert!(!config.scratch(&project.id).exists());
    assert!(!config.log_path(&project.id).exists());
    // Artifacts belong to the user
    assert!(project.outputs[0].exists());
}

#[test]
fn corrupt_registry_is_restored_and_needs_retry() {
    let fx = Fixture::new();
    let docs = fx.add("docs");
    fx.add("site");
    let third = fx.tree("third");
    let registry = fx.sup.config().registry_path.clone();
    fs::write(&registry, "{ not json").unwrap();

    let err = fx.sup.add("third", &s(&third), &s(&third.join("README.md"))).unwrap_err();
    assert!(matches!(err, SupervisorError::RetryNeeded));

    // Restored to the state before the last successful write
    let restored = fx.sup.projects().unwrap();
    assert_eq!(restored, vec![docs]);

    fx.sup.add("third", &s(&third), &s(&third.join("README.md"))).unwrap();
    assert_eq!(fx.sup.projects().unwrap().len(), 2);
}

#[test]
fn corrupt_registry_without_backup_is_an_error() {
    let fx = Fixture::new();
    fx.add("docs");
    fs::write(&fx.sup.config().registry_path, "garbage").unwrap();

    let err = fx.sup.projects().unwrap_err();
    assert!(matches!(err, SupervisorError::Gateway(tw_storage::GatewayError::Corrupted { .. })));
}
