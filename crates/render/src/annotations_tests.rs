// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::splice::{END_MARKER, START_MARKER};
use yare::parameterized;

fn doc(listing: &str) -> String {
    format!("{START_MARKER}\n```\n{listing}\n```\n{END_MARKER}\n")
}

fn node(line: &str, key: &str) -> Node {
    Node { line: line.to_string(), key: key.to_string() }
}

#[test]
fn nested_lines_map_to_relative_paths() {
    let prior = doc("proj/  # root\n\
         ├── src/  # sources\n\
         │   ├── core/  # core\n\
         │   │   └── engine.rs  # engine\n\
         │   └── main.rs  # main\n\
         └── README.md  # readme");

    let notes = Annotations::parse(&prior, "proj/");

    assert_eq!(notes.by_path.get("").map(String::as_str), Some("root"));
    assert_eq!(notes.by_path.get("src/").map(String::as_str), Some("sources"));
    assert_eq!(notes.by_path.get("src/core/").map(String::as_str), Some("core"));
    assert_eq!(notes.by_path.get("src/core/engine.rs").map(String::as_str), Some("engine"));
    assert_eq!(notes.by_path.get("src/main.rs").map(String::as_str), Some("main"));
    assert_eq!(notes.by_path.get("README.md").map(String::as_str), Some("readme"));
}

#[test]
fn placeholder_comments_still_track_directories() {
    let prior = doc(&format!(
        "proj/  # {PLACEHOLDER}\n├── src/  # {PLACEHOLDER}\n│   └── lib.rs  # library\n└── a.md  # {PLACEHOLDER}"
    ));

    let notes = Annotations::parse(&prior, "proj/");

    assert_eq!(notes.by_path.len(), 1);
    assert_eq!(notes.by_path.get("src/lib.rs").map(String::as_str), Some("library"));
}

#[test]
fn duplicate_names_have_no_fallback() {
    let prior = doc("proj/\n├── a/\n│   └── mod.rs  # first\n└── b/\n    └── mod.rs  # second");

    let notes = Annotations::parse(&prior, "proj/");

    assert_eq!(notes.by_path.len(), 2);
    assert!(!notes.by_unique_name.contains_key("mod.rs"));
}

#[parameterized(
    no_markers = { "just some text" },
    empty = { "" },
    end_before_start = { "<!-- AUTO_TREE_END -->\n├── a  # x\n<!-- AUTO_TREE_START -->" },
)]
fn documents_without_block_have_no_annotations(prior: &str) {
    let notes = Annotations::parse(prior, "proj/");
    assert!(notes.by_path.is_empty());
}

#[test]
fn unique_name_fallback_is_used_once() {
    let prior = doc("proj/\n└── notes.md  # scratch");
    let notes = Annotations::parse(&prior, "proj/");
    let nodes = vec![
        node("proj/", ""),
        node("├── a/", "a/"),
        node("│   └── notes.md", "a/notes.md"),
        node("└── b/", "b/"),
        node("    └── notes.md", "b/notes.md"),
    ];

    let merged = merge(&nodes, &notes);

    let with_comment = merged.lines().filter(|l| l.ends_with("# scratch")).count();
    assert_eq!(with_comment, 1);
}

#[test]
fn merge_pads_to_longest_line() {
    let nodes = vec![node("proj/", ""), node("└── long_name.rs", "long_name.rs")];

    let merged = merge(&nodes, &Annotations::default());

    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines[1], format!("└── long_name.rs  # {PLACEHOLDER}"));
    assert_eq!(lines[0], format!("proj/{}# {PLACEHOLDER}", " ".repeat(13)));
}
