//! Delimiter-stack emphasis/strong resolution (spec.md §4.5).
//!
//! Loosely grounded on the same save/restore cursor discipline as
//! `markdown-neuraxis-engine::parsing::inline::parser::try_parse_code_span`,
//! generalized from a single try-then-fall-back attempt into the full
//! delimiter-stack algorithm (an opener can be reused by several closers at
//! decreasing counts, producing nested `Emphasis`/`Strong` pairs from a
//! single run like `***x***`).
//!
//! Bracket and bang tokens are *not* matched into links or images here —
//! this core does not resolve inline links/images (spec.md §9); they pass
//! through as their literal characters.

use super::lexer::RawToken;
use crate::tree::Node;

pub fn resolve(tokens: Vec<RawToken>) -> Vec<Node> {
    let items: Vec<Item> = tokens.into_iter().map(token_to_item).collect();
    resolve_emphasis(items)
}

enum Item {
    Node(Node),
    Delim {
        ch: char,
        count: usize,
        can_open: bool,
        can_close: bool,
    },
}

fn token_to_item(token: RawToken) -> Item {
    match token {
        RawToken::Delim {
            ch,
            count,
            can_open,
            can_close,
        } => Item::Delim {
            ch,
            count,
            can_open,
            can_close,
        },
        other => Item::Node(token_to_node(other)),
    }
}

fn token_to_node(token: RawToken) -> Node {
    match token {
        RawToken::Text(s) => Node::Text { value: s },
        RawToken::CodeSpan(s) => Node::CodeSpan { code: s },
        RawToken::Autolink { url, is_email } => {
            let display = if is_email {
                url.strip_prefix("mailto:").unwrap_or(&url).to_string()
            } else {
                url.clone()
            };
            Node::Link {
                url,
                title: None,
                children: vec![Node::Text { value: display }],
            }
        }
        RawToken::RawHtml(s) => Node::RawHtml { content: s },
        RawToken::HardBreak => Node::Linebreak,
        RawToken::SoftBreak => Node::Text { value: "\n".into() },
        RawToken::Bang => Node::Text { value: "!".into() },
        RawToken::LBracket => Node::Text { value: "[".into() },
        RawToken::RBracket => Node::Text { value: "]".into() },
        RawToken::Delim { .. } => unreachable!("delimiter runs are handled by token_to_item"),
    }
}

struct Run {
    slot: usize,
    ch: char,
    count: usize,
    can_open: bool,
    can_close: bool,
}

fn resolve_emphasis(items: Vec<Item>) -> Vec<Node> {
    let mut slots: Vec<Node> = Vec::with_capacity(items.len());
    let mut runs: Vec<Run> = Vec::new();
    for item in items {
        match item {
            Item::Node(n) => slots.push(n),
            Item::Delim {
                ch,
                count,
                can_open,
                can_close,
            } => {
                runs.push(Run {
                    slot: slots.len(),
                    ch,
                    count,
                    can_open,
                    can_close,
                });
                slots.push(Node::Text {
                    value: ch.to_string().repeat(count),
                });
            }
        }
    }

    // spec.md §4.5: "Iterate closers from right to left."
    let mut cursor = runs.len() as isize - 1;
    while cursor >= 0 {
        let closer_pos = cursor as usize;
        if runs[closer_pos].count == 0 || !runs[closer_pos].can_close {
            cursor -= 1;
            continue;
        }
        let mut opener_pos = None;
        let mut k = closer_pos;
        while k > 0 {
            k -= 1;
            if runs[k].count > 0 && runs[k].can_open && runs[k].ch == runs[closer_pos].ch {
                opener_pos = Some(k);
                break;
            }
        }
        let Some(opener_pos) = opener_pos else {
            cursor -= 1;
            continue;
        };

        let open_slot = runs[opener_pos].slot;
        let close_slot = runs[closer_pos].slot;
        let inner = slots[open_slot + 1..close_slot].to_vec();

        // Triple-or-more runs on both sides are the `***x***` tie-break
        // (spec.md §4.5): consume 3 in one step, directly nesting a strong
        // around an emphasis, rather than resolving 2-then-1 across two
        // passes (which would nest the other way around).
        let use_len = if runs[opener_pos].count >= 3 && runs[closer_pos].count >= 3 {
            3
        } else if runs[opener_pos].count >= 2 && runs[closer_pos].count >= 2 {
            2
        } else {
            1
        };
        let new_node = if use_len == 3 {
            Node::Strong {
                children: vec![Node::Emphasis { children: inner }],
            }
        } else if use_len == 2 {
            Node::Strong { children: inner }
        } else {
            Node::Emphasis { children: inner }
        };

        runs[opener_pos].count -= use_len;
        runs[closer_pos].count -= use_len;

        let mut replacement = Vec::new();
        if runs[opener_pos].count > 0 {
            replacement.push(Node::Text {
                value: runs[opener_pos].ch.to_string().repeat(runs[opener_pos].count),
            });
        }
        replacement.push(new_node);
        if runs[closer_pos].count > 0 {
            replacement.push(Node::Text {
                value: runs[closer_pos].ch.to_string().repeat(runs[closer_pos].count),
            });
        }

        let removed = close_slot - open_slot + 1;
        let added = replacement.len();
        slots.splice(open_slot..=close_slot, replacement);
        let delta = added as isize - removed as isize;
        for (idx, r) in runs.iter_mut().enumerate() {
            if idx == opener_pos || idx == closer_pos {
                continue;
            }
            if r.slot > close_slot {
                r.slot = (r.slot as isize + delta) as usize;
            }
        }

        let leftover_open_exists = runs[opener_pos].count > 0;
        let leftover_close_exists = runs[closer_pos].count > 0;
        runs[opener_pos].slot = open_slot;
        runs[closer_pos].slot = open_slot
            + if leftover_open_exists { 1 } else { 0 }
            + if leftover_close_exists { 1 } else { 0 };

        if runs[closer_pos].count == 0 {
            cursor -= 1;
        }
    }

    merge_adjacent_text(slots)
}

fn merge_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(Node::Text { value: prev }), Node::Text { value: next }) =
            (out.last_mut(), &node)
        {
            prev.push_str(next);
        } else {
            out.push(node);
        }
    }
    out
}
