// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-render: annotated directory listings spliced into documents
//!
//! The listing lives between [`START_MARKER`] and [`END_MARKER`] inside a
//! fenced block. Each line may carry a `# comment`; comments written by
//! people survive regeneration, keyed by the entry's relative path.

mod annotations;
mod splice;
mod tree;

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

pub use splice::{END_MARKER, START_MARKER};
pub use tree::SYSTEM_IGNORES;

/// Placeholder written next to entries nobody has described yet.
pub const PLACEHOLDER: &str = "TODO: Add comment here";

/// Render the listing of `root` and splice it into `prior`.
///
/// `prior` is the document's current content (possibly empty). Returns the
/// complete new document.
pub fn render(root: &Path, prior: &str, ignore: &BTreeSet<String>) -> io::Result<String> {
    let nodes = tree::build(root, ignore)?;
    let notes = annotations::Annotations::parse(prior, &tree::root_label(root));
    let listing = annotations::merge(&nodes, &notes);
    tracing::debug!(root = %root.display(), entries = nodes.len(), "rendered listing");
    Ok(splice::splice(prior, &listing))
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
