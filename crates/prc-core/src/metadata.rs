//! Metadata codec: the hidden marker that round-trips the posted
//! snippet-id list inside a comment body.
//!
//! The marker is a single HTML-comment line, bit-exact on the wire:
//!
//! ```text
//! <!-- pr-commenter-metadata: id1,id2 -->
//! ```
//!
//! An empty id list encodes to an empty payload, which is a distinct,
//! valid state — [`decode`] distinguishes "marker present with no ids"
//! (`Some(vec![])`) from "no marker at all" (`None`).

use std::sync::LazyLock;

use regex::Regex;

// Snippet-id charset plus the comma separator.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- pr-commenter-metadata: ([A-Za-z0-9\-_,]*) -->").expect("marker regex")
});

/// Encode an ordered id list into the marker line.
pub fn encode(ids: &[String]) -> String {
    format!("<!-- pr-commenter-metadata: {} -->", ids.join(","))
}

/// Extract the id list from a comment body, if a marker is present.
///
/// Uses the first occurrence. Payload tokens are trimmed and empty tokens
/// discarded, so stray commas never produce empty ids.
pub fn decode(text: &str) -> Option<Vec<String>> {
    let captures = MARKER.captures(text)?;
    let payload = captures.get(1).map_or("", |m| m.as_str());
    Some(
        payload
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .collect(),
    )
}
