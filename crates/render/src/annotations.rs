// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comments recovered from a previously rendered listing.

use std::collections::{HashMap, HashSet};

use crate::splice;
use crate::tree::{Node, BRANCH, LAST_BRANCH};
use crate::PLACEHOLDER;

/// Each nesting level is four columns wide.
const INDENT_WIDTH: usize = 4;

#[derive(Debug, Default)]
pub(crate) struct Annotations {
    by_path: HashMap<String, String>,
    /// Only names that appeared once in the prior listing
    by_unique_name: HashMap<String, String>,
}

impl Annotations {
    pub(crate) fn parse(prior: &str, root_label: &str) -> Self {
        let Some(block) = splice::extract_block(prior) else {
            return Self::default();
        };

        let mut by_path = HashMap::new();
        let mut names: HashMap<String, Vec<String>> = HashMap::new();
        let mut stack: Vec<String> = Vec::new();

        for raw in block.lines() {
            let (visual, comment) = match raw.rsplit_once('#') {
                Some((visual, comment)) => (visual.trim_end(), comment.trim()),
                None => (raw.trim_end(), ""),
            };
            let Some(key) = line_to_key(visual, root_label, &mut stack) else {
                continue;
            };
            if comment.is_empty() || comment.starts_with("TODO:") {
                continue;
            }
            let name = basename(&key);
            if !name.is_empty() {
                names.entry(name.to_string()).or_default().push(key.clone());
            }
            by_path.insert(key, comment.to_string());
        }

        let by_unique_name = names
            .into_iter()
            .filter(|(_, keys)| keys.len() == 1)
            .filter_map(|(name, keys)| {
                let comment = by_path.get(&keys[0])?.clone();
                Some((name, comment))
            })
            .collect();

        Self { by_path, by_unique_name }
    }
}

/// Map one listing line back to its relative path, tracking the enclosing
/// directories in `stack`. Non-entry lines yield `None`.
fn line_to_key(visual: &str, root_label: &str, stack: &mut Vec<String>) -> Option<String> {
    if visual == root_label {
        stack.clear();
        return Some(String::new());
    }
    let (at, token) = [LAST_BRANCH, BRANCH]
        .iter()
        .find_map(|token| visual.find(token).map(|at| (at, *token)))?;
    let depth = visual[..at].chars().count() / INDENT_WIDTH;
    let name = &visual[at + token.len()..];
    if name.is_empty() {
        return None;
    }

    stack.truncate(depth);
    if name.ends_with('/') {
        stack.push(name.to_string());
        Some(stack.concat())
    } else {
        Some(format!("{}{name}", stack.concat()))
    }
}

fn basename(key: &str) -> &str {
    let trimmed = key.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Attach comments to freshly built nodes and align them into one column.
pub(crate) fn merge(nodes: &[Node], notes: &Annotations) -> String {
    let width = nodes.iter().map(|n| n.line.chars().count()).max().unwrap_or(0);
    let mut used_names: HashSet<&str> = HashSet::new();

    let lines: Vec<String> = nodes
        .iter()
        .map(|node| {
            let comment = match notes.by_path.get(&node.key) {
                Some(comment) => comment.as_str(),
                None => {
                    let name = basename(&node.key);
                    match notes.by_unique_name.get(name) {
                        Some(comment) if !name.is_empty() && used_names.insert(name) => {
                            comment.as_str()
                        }
                        _ => PLACEHOLDER,
                    }
                }
            };
            let pad = width - node.line.chars().count() + 2;
            format!("{}{:pad$}# {comment}", node.line, "")
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod tests;
