// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn update_renders_every_output() {
    let mut fx = Fixture::new();
    let project = fx.add("docs");
    let extra = project.root.join("TREE.md");
    fx.sup.add_output("docs", &s(&extra)).unwrap();

    let written = fx.sup.update("docs").unwrap();

    assert_eq!(written, vec![project.outputs[0].clone(), extra]);
    for path in written {
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("<!-- AUTO_TREE_START -->"));
        assert!(text.contains("Cargo.toml"));
    }
}

#[test]
fn update_keeps_annotations_and_surrounding_text() {
    let fx = Fixture::new();
    let project = fx.add("docs");
    let readme = &project.outputs[0];
    fx.sup.update("docs").unwrap();

    let annotated = fs::read_to_string(readme)
        .unwrap()
        .replacen("# TODO: Add comment here", "# the docs root", 1);
    fs::write(readme, format!("# Docs\n\n{annotated}\nMore prose.\n")).unwrap();
    fs::write(project.root.join("new.txt"), "").unwrap();

    fx.sup.update("docs").unwrap();

    let text = fs::read_to_string(readme).unwrap();
    assert!(text.starts_with("# Docs\n\n<!-- AUTO_TREE_START -->"));
    assert!(text.contains("# the docs root"));
    assert!(text.contains("new.txt"));
    assert!(text.ends_with("More prose.\n"));
}

#[test]
fn update_with_missing_root_is_invalid() {
    let fx = Fixture::new();
    let project = fx.add("docs");
    fs::remove_dir_all(&project.root).unwrap();

    assert!(matches!(fx.sup.update("docs"), Err(SupervisorError::Invalid(_))));
}

#[test]
fn update_direct_needs_no_registry_entry() {
    let fx = Fixture::new();
    let root = fx.tree("adhoc");
    let output = fx.dir.path().join("work/ADHOC.md");

    let written = fx.sup.update_direct(&s(&root), &s(&output), &["src".into()]).unwrap();

    assert_eq!(written, output);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Cargo.toml"));
    assert!(!text.contains("main.rs"));
    assert!(fx.sup.projects().unwrap().is_empty());

    let missing_parent = fx.dir.path().join("nowhere/ADHOC.md");
    assert!(fx.sup.update_direct(&s(&root), &s(&missing_parent), &[]).is_err());
}
