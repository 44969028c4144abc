//! List marker recognition (spec.md §4.2 step C.6).

use regex::Regex;
use std::sync::LazyLock;

static UNORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}([*+-])(?:\s+(.*))?$").unwrap());

static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(\d{1,9})([.)])(?:\s+(.*))?$").unwrap());

/// A recognized list item marker: whether the list is ordered, the start
/// number for an ordered list's first item, and the content following the
/// marker on this line.
pub struct ListOpen {
    pub ordered: bool,
    pub start: Option<u64>,
    pub content: String,
}

pub fn match_marker(remainder: &str) -> Option<ListOpen> {
    if let Some(caps) = UNORDERED.captures(remainder) {
        return Some(ListOpen {
            ordered: false,
            start: None,
            content: caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string(),
        });
    }
    if let Some(caps) = ORDERED.captures(remainder) {
        let start = caps[1].parse().ok();
        return Some(ListOpen {
            ordered: true,
            start,
            content: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
        });
    }
    None
}
