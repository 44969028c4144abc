//! Fenced code block recognition (spec.md §4.2 step C.4, §4.3 Step A).

use regex::Regex;
use std::sync::LazyLock;

static OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*(.*?)\s*$").unwrap());

/// An opening fence: the delimiter character, its run length, and an
/// optional info-string language (the first whitespace-delimited word).
pub struct FenceOpen {
    pub fence_char: char,
    pub fence_len: usize,
    pub language: Option<String>,
}

pub fn match_open(remainder: &str) -> Option<FenceOpen> {
    let caps = OPEN.captures(remainder)?;
    let run = &caps[1];
    let fence_char = run.chars().next().unwrap();
    let info = caps[2].trim();
    // A backtick fence's info string may not itself contain a backtick.
    if fence_char == '`' && info.contains('`') {
        return None;
    }
    let language = info.split_whitespace().next().map(str::to_string);
    Some(FenceOpen {
        fence_char,
        fence_len: run.len(),
        language,
    })
}

/// True if `line` closes a fence opened with `fence_char` repeated at least
/// `fence_len` times, allowing up to three leading spaces and no trailing
/// content beyond the fence itself.
pub fn is_closing(line: &str, fence_char: char, fence_len: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let run_len = trimmed.chars().take_while(|&c| c == fence_char).count();
    if run_len < fence_len {
        return false;
    }
    trimmed[run_len..].trim().is_empty()
}
