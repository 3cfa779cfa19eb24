// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

#[test]
fn new_ids_carry_prefix_and_are_unique() {
    let a = ProjectId::new();
    let b = ProjectId::new();
    assert!(a.starts_with(ProjectId::PREFIX));
    assert_eq!(a.len(), ProjectId::PREFIX.len() + 19);
    assert_ne!(a, b);
}

#[test]
fn hash_map_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(ProjectId::from_string("prj-abc"), 42);
    assert_eq!(map.get("prj-abc"), Some(&42));
}

#[yare::parameterized(
    truncates      = { "prj-abcdefghijk", 8, "abcdefgh" },
    shorter        = { "prj-abc",         8, "abc" },
    without_prefix = { "abcdefghijk",     4, "abcd" },
)]
fn short_strips_prefix(raw: &str, n: usize, expected: &str) {
    assert_eq!(ProjectId::from_string(raw).short(n), expected);
}

#[test]
fn serializes_transparently() {
    let id = ProjectId::from_string("prj-xyz");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"prj-xyz\"");
    let back: ProjectId = serde_json::from_str("\"prj-xyz\"").unwrap();
    assert_eq!(back, id);
}
