//! Inline tokenization (spec.md §4.4).
//!
//! Produces a flat token stream: code spans, autolinks, raw HTML, line
//! breaks, and text are fully resolved here; emphasis delimiter runs and
//! bracket markers are left for [`super::delimiter`] to match up, since
//! doing that requires look-ahead across the whole stream.

use super::cursor::Cursor;
use crate::block::kinds::html_block;
use regex::Regex;
use std::sync::LazyLock;

static AUTOLINK_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]{1,31}:[^<>\x00-\x20]*$").unwrap());

static AUTOLINK_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$").unwrap()
});

// Matches the generic shape of a tag/comment/PI/CDATA/declaration lexeme;
// the curated tag-name check happens afterwards via `html_block::is_opener`
// so a single regex owns the allowed-tag list (spec.md §4.4: the inline
// `<…>` lexeme must pass the §4.2 strict HTML-block check to become
// `raw_html`, or else fall back to escaped text).
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:</?[A-Za-z][A-Za-z0-9-]*(?:\s+[^<>]*)?/?>|<!--.*?-->|<\?.*?\?>|<!\[CDATA\[.*?\]\]>|<![A-Za-z][^<>]*>)")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq)]
pub enum RawToken {
    Text(String),
    CodeSpan(String),
    Autolink { url: String, is_email: bool },
    RawHtml(String),
    HardBreak,
    SoftBreak,
    Delim {
        ch: char,
        count: usize,
        can_open: bool,
        can_close: bool,
    },
    Bang,
    LBracket,
    RBracket,
}

pub fn lex(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut cur = Cursor::new(text);
    let mut buf = String::new();

    macro_rules! flush_text {
        () => {
            if !buf.is_empty() {
                tokens.push(RawToken::Text(std::mem::take(&mut buf)));
            }
        };
    }

    while !cur.eof() {
        let c = cur.peek().unwrap();
        match c {
            '\\' => {
                let escaped = cur.rest().chars().nth(1);
                match escaped {
                    Some(e) if e.is_ascii_punctuation() => {
                        cur.bump();
                        cur.bump();
                        buf.push(e);
                    }
                    Some('\n') => {
                        cur.bump();
                        cur.bump();
                        flush_text!();
                        tokens.push(RawToken::HardBreak);
                    }
                    _ => {
                        cur.bump();
                        buf.push('\\');
                    }
                }
            }
            '`' => {
                let start = cur.pos();
                let opening = cur.bump_run('`');
                if let Some(content) = try_code_span(&mut cur, opening) {
                    flush_text!();
                    tokens.push(RawToken::CodeSpan(content));
                } else {
                    buf.push_str(&text[start..cur.pos()]);
                }
            }
            '<' => {
                if let Some((token, len)) = try_autolink_or_html(cur.rest()) {
                    flush_text!();
                    tokens.push(token);
                    for _ in 0..len {
                        cur.bump();
                    }
                } else {
                    cur.bump();
                    buf.push('<');
                }
            }
            '\n' => {
                let trailing_spaces = buf.chars().rev().take_while(|c| *c == ' ').count();
                let hard = trailing_spaces >= 2;
                let trimmed_len = buf.len() - trailing_spaces;
                buf.truncate(trimmed_len);
                flush_text!();
                cur.bump();
                while cur.peek() == Some(' ') {
                    cur.bump();
                }
                tokens.push(if hard {
                    RawToken::HardBreak
                } else {
                    RawToken::SoftBreak
                });
            }
            '!' if cur.rest().starts_with("![") => {
                flush_text!();
                cur.bump();
                cur.bump();
                tokens.push(RawToken::Bang);
                tokens.push(RawToken::LBracket);
            }
            '[' => {
                flush_text!();
                cur.bump();
                tokens.push(RawToken::LBracket);
            }
            ']' => {
                flush_text!();
                cur.bump();
                tokens.push(RawToken::RBracket);
            }
            '*' | '_' => {
                let before = cur.peek_prev();
                let count = cur.bump_run(c);
                let after = cur.peek();
                let (can_open, can_close) = classify_flanking(before, after, c);
                flush_text!();
                tokens.push(RawToken::Delim {
                    ch: c,
                    count,
                    can_open,
                    can_close,
                });
            }
            other => {
                cur.bump();
                buf.push(other);
            }
        }
    }
    flush_text!();
    tokens
}

fn try_code_span(cur: &mut Cursor, opening: usize) -> Option<String> {
    let content_start = cur.pos();
    loop {
        if cur.eof() {
            return None;
        }
        if cur.peek() == Some('`') {
            let close_start = cur.pos();
            let run = cur.bump_run('`');
            if run == opening {
                return Some(normalize_code_span(&cur.source()[content_start..close_start]));
            }
        } else {
            cur.bump();
        }
    }
}

fn normalize_code_span(content: &str) -> String {
    let collapsed: String = content
        .split('\n')
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = collapsed.trim();
    if !trimmed.is_empty() && collapsed.starts_with(' ') && collapsed.ends_with(' ') {
        trimmed.to_string()
    } else {
        collapsed
    }
}

fn try_autolink_or_html(rest: &str) -> Option<(RawToken, usize)> {
    if let Some(end) = rest.find('>') {
        let inner = &rest[1..end];
        if AUTOLINK_URI.is_match(inner) {
            return Some((
                RawToken::Autolink {
                    url: inner.to_string(),
                    is_email: false,
                },
                end + 1,
            ));
        }
        if AUTOLINK_EMAIL.is_match(inner) {
            return Some((
                RawToken::Autolink {
                    url: format!("mailto:{inner}"),
                    is_email: true,
                },
                end + 1,
            ));
        }
    }
    if let Some(m) = HTML_TAG.find(rest) {
        let lexeme = m.as_str();
        if html_block::is_opener(lexeme) {
            return Some((RawToken::RawHtml(lexeme.to_string()), m.end()));
        }
    }
    None
}

/// Delimiter flanking per spec.md §4.5 — deliberately simpler than full
/// CommonMark: no punctuation term, just a whitespace check plus (for `_`
/// only) an intraword guard. `canOpen` for `*` is "next exists and isn't
/// whitespace"; `canClose` is "prev exists and isn't whitespace". `_` adds:
/// no opening when surrounded by alphanumerics on both sides (no intraword
/// underscore).
fn classify_flanking(before: Option<char>, after: Option<char>, ch: char) -> (bool, bool) {
    let can_open = after.is_some_and(|c| !c.is_whitespace());
    let can_close = before.is_some_and(|c| !c.is_whitespace());

    if ch == '_' {
        let intraword = before.is_some_and(|c| c.is_alphanumeric())
            && after.is_some_and(|c| c.is_alphanumeric());
        (can_open && !intraword, can_close && !intraword)
    } else {
        (can_open, can_close)
    }
}
