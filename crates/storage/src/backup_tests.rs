// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn newest_first_follows_creation_order() {
    let dir = tempdir().unwrap();
    let backups = Backups::new(dir.path().join("bak"), 10);

    for i in 0..4 {
        backups.create(format!("v{i}").as_bytes()).unwrap();
    }

    let contents: Vec<String> = backups
        .newest_first()
        .unwrap()
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(contents, vec!["v3", "v2", "v1", "v0"]);
}

#[test]
fn prunes_oldest_beyond_retention() {
    let dir = tempdir().unwrap();
    let backups = Backups::new(dir.path().join("bak"), 3);

    for i in 0..6 {
        backups.create(format!("v{i}").as_bytes()).unwrap();
    }

    let contents: Vec<String> = backups
        .newest_first()
        .unwrap()
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(contents, vec!["v5", "v4", "v3"]);
}

#[test]
fn missing_dir_means_no_backups() {
    let dir = tempdir().unwrap();
    let backups = Backups::new(dir.path().join("never-created"), 3);
    assert!(backups.newest_first().unwrap().is_empty());
}

#[test]
fn ignores_foreign_files() {
    let dir = tempdir().unwrap();
    let bak_dir = dir.path().join("bak");
    let backups = Backups::new(bak_dir.clone(), 3);
    backups.create(b"real").unwrap();
    fs::write(bak_dir.join("notes.txt"), "not a backup").unwrap();

    assert_eq!(backups.newest_first().unwrap().len(), 1);
}
