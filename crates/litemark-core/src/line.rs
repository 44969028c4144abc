//! Line normalization (spec.md §4.1).
//!
//! Grounded on the line-iteration idea in
//! `markdown-neuraxis-engine::parsing::rope::lines`, adapted from slicing a
//! persistent rope to splitting an owned `&str` once up front, since
//! litemark-core has no rope buffer to keep alive across phases.

/// Converts CRLF/CR to LF and splits on LF.
///
/// Trailing blank lines are not stripped: a source ending in `"\n"` yields a
/// final empty line, which stays visible to the block phase (spec.md §4.1).
pub fn normalize_lines(source: &str) -> Vec<String> {
    let mut normalized = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                normalized.push('\n');
            }
            other => normalized.push(other),
        }
    }
    normalized.split('\n').map(str::to_string).collect()
}
