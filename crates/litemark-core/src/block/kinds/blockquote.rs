//! Blockquote marker recognition (spec.md §4.2 steps B/C.5).

use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ {0,3}>( ?)").unwrap());

pub const PREFIX: char = '>';

/// If `line` starts with a blockquote marker, returns the byte length of the
/// matched prefix (marker plus at most one following space).
pub fn match_prefix(line: &str) -> Option<usize> {
    MARKER.find(line).map(|m| m.end())
}
