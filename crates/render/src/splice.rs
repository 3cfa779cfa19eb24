// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and replacing the generated block inside a document.

pub const START_MARKER: &str = "<!-- AUTO_TREE_START -->";
pub const END_MARKER: &str = "<!-- AUTO_TREE_END -->";

const FENCE: &str = "```";

/// Byte range of the text between the markers, if both are present in order.
fn block_range(doc: &str) -> Option<(usize, usize)> {
    let start = doc.find(START_MARKER)? + START_MARKER.len();
    let end = start + doc[start..].find(END_MARKER)?;
    Some((start, end))
}

/// The listing text inside the markers, without its fence.
pub(crate) fn extract_block(doc: &str) -> Option<&str> {
    let (start, end) = block_range(doc)?;
    let inner = doc[start..end].trim();
    let unfenced = inner
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .map(str::trim)
        .unwrap_or(inner);
    Some(unfenced)
}

/// Replace the marked block of `doc` with `listing`, or append a new block.
pub(crate) fn splice(doc: &str, listing: &str) -> String {
    let block = format!("{START_MARKER}\n{FENCE}\n{}\n{FENCE}\n{END_MARKER}", listing.trim());
    match block_range(doc) {
        Some((start, end)) => {
            let head = &doc[..start - START_MARKER.len()];
            let tail = &doc[end + END_MARKER.len()..];
            format!("{head}{block}{tail}")
        }
        None => format!("{}\n\n{block}", doc.trim_end()).trim_start().to_string(),
    }
}

#[cfg(test)]
#[path = "splice_tests.rs"]
mod tests;
