//! ATX and setext heading recognition (spec.md §4.2 steps C.1/C.3).

use regex::Regex;
use std::sync::LazyLock;

static ATX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(#{1,6})(?:\s+(.*?))?\s*$").unwrap());

static ATX_CLOSING_HASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+#+\s*$").unwrap());

static SETEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ {0,3}(=+|-+)\s*$").unwrap());

/// A recognized ATX heading: level and unprocessed inline content.
pub struct AtxHeading {
    pub level: u8,
    pub content: String,
}

/// Matches `^ {0,3}#{1,6}(\s+...)?\s*$`, stripping an optional trailing run
/// of closing hashes from the content.
pub fn match_atx(remainder: &str) -> Option<AtxHeading> {
    let caps = ATX.captures(remainder)?;
    let level = caps[1].len() as u8;
    let raw_content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let content = ATX_CLOSING_HASHES.replace(raw_content, "").trim().to_string();
    Some(AtxHeading { level, content })
}

/// True if `1` for a `=` run, `2` for a `-` run, matching
/// `^ {0,3}(=+|-+)\s*$`.
pub fn match_setext_level(remainder: &str) -> Option<u8> {
    let caps = SETEXT.captures(remainder)?;
    if caps[1].starts_with('=') { Some(1) } else { Some(2) }
}
