//! The container-stack state machine described in spec.md §4.2 steps A–D.

use super::kinds::{blockquote, fence, heading, html_block, indented_code, list, thematic_break};
use super::{refdef, RawNode};
use crate::tree::RefDefinition;
use std::collections::HashMap;

/// One entry on the open-container stack. Leaf frames (`Paragraph`,
/// `FencedCode`, `IndentedCode`) accumulate raw text; container frames
/// accumulate finished `RawNode` children as their nested content closes.
enum Frame {
    Document,
    BlockQuote,
    List {
        ordered: bool,
        start: Option<u64>,
        /// Set once a blank line is seen between this list's items or
        /// within an item's content (spec.md glossary: "tight list").
        loose: bool,
    },
    ListItem,
    Paragraph {
        lines: Vec<String>,
    },
    FencedCode {
        fence_char: char,
        fence_len: usize,
        language: Option<String>,
        lines: Vec<String>,
    },
    IndentedCode {
        lines: Vec<String>,
    },
}

struct StackEntry {
    frame: Frame,
    children: Vec<RawNode>,
}

/// Drives the block phase one line at a time, maintaining the stack of
/// currently open containers.
pub struct BlockParser {
    stack: Vec<StackEntry>,
    ref_definitions: HashMap<String, RefDefinition>,
}

impl BlockParser {
    pub fn new() -> Self {
        BlockParser {
            stack: vec![StackEntry {
                frame: Frame::Document,
                children: Vec::new(),
            }],
            ref_definitions: HashMap::new(),
        }
    }

    pub fn process_line(&mut self, line: &str) {
        if let Frame::FencedCode {
            fence_char,
            fence_len,
            ..
        } = &self.stack.last().unwrap().frame
        {
            let (fence_char, fence_len) = (*fence_char, *fence_len);
            if fence::is_closing(line, fence_char, fence_len) {
                self.close_top();
            } else if let Frame::FencedCode { lines, .. } = &mut self.stack.last_mut().unwrap().frame {
                lines.push(line.to_string());
            }
            return;
        }

        let mut offset = 0usize;
        let mut fail_depth = None;
        for i in 1..self.stack.len() {
            match &self.stack[i].frame {
                Frame::BlockQuote => {
                    let remainder = &line[offset..];
                    if remainder.trim().is_empty() {
                        // A blank line still continues an open blockquote.
                    } else if let Some(consumed) = blockquote::match_prefix(remainder) {
                        offset += consumed;
                    } else {
                        fail_depth = Some(i);
                        break;
                    }
                }
                Frame::Paragraph { .. } => {
                    if line[offset..].trim().is_empty() {
                        fail_depth = Some(i);
                        break;
                    }
                }
                // Lists/list items defer every real decision to the
                // open-new-containers step; indented code blocks are
                // re-evaluated per line there too.
                Frame::List { .. } | Frame::ListItem | Frame::IndentedCode { .. } => {}
                Frame::Document | Frame::FencedCode { .. } => unreachable!(),
            }
        }
        if let Some(depth) = fail_depth {
            while self.stack.len() > depth {
                self.close_top();
            }
        }

        let remainder = line[offset..].to_string();
        self.step_c(&remainder);
    }

    fn step_c(&mut self, remainder: &str) {
        let setext_level = match &self.stack.last().unwrap().frame {
            Frame::Paragraph { lines } if !lines.is_empty() => heading::match_setext_level(remainder),
            _ => None,
        };
        if let Some(level) = setext_level {
            let entry = self.stack.pop().unwrap();
            let raw = match entry.frame {
                Frame::Paragraph { lines } => lines.join("\n"),
                _ => unreachable!(),
            };
            self.top_children_mut().push(RawNode::Heading { level, raw });
            return;
        }

        if thematic_break::is_thematic_break(remainder) {
            self.close_paragraph_if_open();
            self.top_children_mut().push(RawNode::ThematicBreak);
            return;
        }

        if let Some(h) = heading::match_atx(remainder) {
            self.close_paragraph_if_open();
            self.top_children_mut().push(RawNode::Heading {
                level: h.level,
                raw: h.content,
            });
            return;
        }

        if let Some(f) = fence::match_open(remainder) {
            self.close_paragraph_if_open();
            self.stack.push(StackEntry {
                frame: Frame::FencedCode {
                    fence_char: f.fence_char,
                    fence_len: f.fence_len,
                    language: f.language,
                    lines: Vec::new(),
                },
                children: Vec::new(),
            });
            return;
        }

        if let Some(consumed) = blockquote::match_prefix(remainder) {
            self.close_paragraph_if_open();
            self.stack.push(StackEntry {
                frame: Frame::BlockQuote,
                children: Vec::new(),
            });
            self.step_c(&remainder[consumed..]);
            return;
        }

        if let Some(open) = list::match_marker(remainder) {
            self.close_paragraph_if_open();
            if matches!(self.stack.last().unwrap().frame, Frame::ListItem) {
                self.close_top();
            }
            let reuse = matches!(
                &self.stack.last().unwrap().frame,
                Frame::List { ordered, .. } if *ordered == open.ordered
            );
            if !reuse {
                if matches!(self.stack.last().unwrap().frame, Frame::List { .. }) {
                    self.close_top();
                }
                self.stack.push(StackEntry {
                    frame: Frame::List {
                        ordered: open.ordered,
                        start: open.start,
                        loose: false,
                    },
                    children: Vec::new(),
                });
            }
            self.stack.push(StackEntry {
                frame: Frame::ListItem,
                children: Vec::new(),
            });
            let first_line = if open.content.is_empty() {
                Vec::new()
            } else {
                vec![open.content]
            };
            self.stack.push(StackEntry {
                frame: Frame::Paragraph { lines: first_line },
                children: Vec::new(),
            });
            return;
        }

        if let Some(content) = indented_code::strip_indent(remainder) {
            if let Frame::IndentedCode { lines } = &mut self.stack.last_mut().unwrap().frame {
                lines.push(content.to_string());
            } else {
                self.close_paragraph_if_open();
                self.stack.push(StackEntry {
                    frame: Frame::IndentedCode {
                        lines: vec![content.to_string()],
                    },
                    children: Vec::new(),
                });
            }
            return;
        }

        if html_block::is_opener(remainder) {
            self.close_paragraph_if_open();
            self.top_children_mut().push(RawNode::HtmlBlock {
                value: remainder.trim().to_string(),
            });
            return;
        }

        if remainder.trim().is_empty() {
            self.step_d();
            return;
        }

        // A non-blank line too shallowly indented to continue an open
        // indented code block ends it; a fresh paragraph takes over.
        if matches!(self.stack.last().unwrap().frame, Frame::IndentedCode { .. }) {
            self.close_top();
        }
        if !matches!(self.stack.last().unwrap().frame, Frame::Paragraph { .. }) {
            self.stack.push(StackEntry {
                frame: Frame::Paragraph { lines: Vec::new() },
                children: Vec::new(),
            });
        }
        if let Frame::Paragraph { lines } = &mut self.stack.last_mut().unwrap().frame {
            lines.push(remainder.to_string());
        }
    }

    fn step_d(&mut self) {
        match &mut self.stack.last_mut().unwrap().frame {
            Frame::Paragraph { .. } => self.close_top(),
            Frame::IndentedCode { lines } => lines.push(String::new()),
            Frame::ListItem | Frame::List { .. } => self.mark_enclosing_list_loose(),
            _ => {}
        }
    }

    fn mark_enclosing_list_loose(&mut self) {
        for entry in self.stack.iter_mut().rev() {
            if let Frame::List { loose, .. } = &mut entry.frame {
                *loose = true;
                return;
            }
        }
    }

    fn close_paragraph_if_open(&mut self) {
        if matches!(self.stack.last().unwrap().frame, Frame::Paragraph { .. }) {
            self.close_top();
        }
    }

    fn top_children_mut(&mut self) -> &mut Vec<RawNode> {
        &mut self.stack.last_mut().unwrap().children
    }

    fn close_top(&mut self) {
        let entry = self.stack.pop().expect("document frame must remain open");
        if let Some(node) = self.finalize(entry) {
            self.top_children_mut().push(node);
        }
    }

    fn finalize(&mut self, entry: StackEntry) -> Option<RawNode> {
        match entry.frame {
            Frame::Document => unreachable!("document is never closed mid-parse"),
            Frame::BlockQuote => Some(RawNode::BlockQuote {
                children: entry.children,
            }),
            Frame::List {
                ordered,
                start,
                loose,
            } => Some(RawNode::List {
                ordered,
                start,
                tight: !loose,
                children: entry.children,
            }),
            Frame::ListItem => Some(RawNode::ListItem {
                children: entry.children,
            }),
            Frame::Paragraph { lines } => {
                let extracted = refdef::extract(&lines);
                for (label, def) in extracted.definitions {
                    self.ref_definitions.entry(label).or_insert(def);
                }
                extracted
                    .remaining
                    .map(|remaining| RawNode::Paragraph { raw: remaining.join("\n") })
            }
            Frame::FencedCode {
                fence_char,
                fence_len,
                language,
                lines,
            } => Some(RawNode::CodeBlock {
                language,
                value: lines.join("\n"),
                fence: Some(fence_char.to_string().repeat(fence_len)),
            }),
            Frame::IndentedCode { lines } => Some(RawNode::CodeBlock {
                language: None,
                value: lines.join("\n"),
                fence: None,
            }),
        }
    }

    pub fn finish(mut self) -> (Vec<RawNode>, HashMap<String, RefDefinition>) {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let root = self.stack.pop().unwrap();
        (root.children, self.ref_definitions)
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<RawNode> {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        super::super::parse_blocks(&lines).0
    }

    #[test]
    fn single_paragraph() {
        let nodes = parse("hello world");
        assert_eq!(nodes, vec![RawNode::Paragraph { raw: "hello world".into() }]);
    }

    #[test]
    fn blank_line_separates_paragraphs() {
        let nodes = parse("a\n\nb");
        assert_eq!(
            nodes,
            vec![
                RawNode::Paragraph { raw: "a".into() },
                RawNode::Paragraph { raw: "b".into() },
            ]
        );
    }

    #[test]
    fn atx_heading() {
        let nodes = parse("## Title");
        assert_eq!(
            nodes,
            vec![RawNode::Heading {
                level: 2,
                raw: "Title".into()
            }]
        );
    }

    #[test]
    fn setext_heading_upgrades_open_paragraph() {
        let nodes = parse("Title\n=====");
        assert_eq!(
            nodes,
            vec![RawNode::Heading {
                level: 1,
                raw: "Title".into()
            }]
        );
    }

    #[test]
    fn thematic_break() {
        let nodes = parse("a\n\n---\n\nb");
        assert_eq!(
            nodes,
            vec![
                RawNode::Paragraph { raw: "a".into() },
                RawNode::ThematicBreak,
                RawNode::Paragraph { raw: "b".into() },
            ]
        );
    }

    #[test]
    fn thematic_break_does_not_interrupt_with_dashes_after_text() {
        // "a\n---" is a setext heading, not a paragraph + thematic break.
        let nodes = parse("a\n---");
        assert_eq!(nodes, vec![RawNode::Heading { level: 2, raw: "a".into() }]);
    }

    #[test]
    fn fenced_code_block() {
        let nodes = parse("```rust\nlet x = 1;\n```");
        assert_eq!(
            nodes,
            vec![RawNode::CodeBlock {
                language: Some("rust".into()),
                value: "let x = 1;".into(),
                fence: Some("```".into()),
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_eof() {
        let nodes = parse("```\na\nb");
        assert_eq!(
            nodes,
            vec![RawNode::CodeBlock {
                language: None,
                value: "a\nb".into(),
                fence: Some("```".into()),
            }]
        );
    }

    #[test]
    fn indented_code_block() {
        let nodes = parse("    code line");
        assert_eq!(
            nodes,
            vec![RawNode::CodeBlock {
                language: None,
                value: "code line".into(),
                fence: None,
            }]
        );
    }

    #[test]
    fn blockquote_wraps_paragraph() {
        let nodes = parse("> hi");
        assert_eq!(
            nodes,
            vec![RawNode::BlockQuote {
                children: vec![RawNode::Paragraph { raw: "hi".into() }],
            }]
        );
    }

    #[test]
    fn blockquote_continuation_strips_marker_from_each_line() {
        let nodes = parse("> line one\n> line two");
        assert_eq!(
            nodes,
            vec![RawNode::BlockQuote {
                children: vec![RawNode::Paragraph {
                    raw: "line one\nline two".into()
                }],
            }]
        );
    }

    #[test]
    fn deeply_nested_blockquote_opens_all_levels_on_one_line() {
        let nodes = parse(">>> deep");
        assert_eq!(
            nodes,
            vec![RawNode::BlockQuote {
                children: vec![RawNode::BlockQuote {
                    children: vec![RawNode::BlockQuote {
                        children: vec![RawNode::Paragraph { raw: "deep".into() }],
                    }],
                }],
            }]
        );
    }

    #[test]
    fn tight_unordered_list() {
        let nodes = parse("- a\n- b");
        assert_eq!(
            nodes,
            vec![RawNode::List {
                ordered: false,
                start: None,
                tight: true,
                children: vec![
                    RawNode::ListItem {
                        children: vec![RawNode::Paragraph { raw: "a".into() }],
                    },
                    RawNode::ListItem {
                        children: vec![RawNode::Paragraph { raw: "b".into() }],
                    },
                ],
            }]
        );
    }

    #[test]
    fn loose_list_tracks_blank_line_between_items() {
        let nodes = parse("- a\n\n- b");
        match &nodes[0] {
            RawNode::List { tight, .. } => assert!(!tight),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn ordered_list_carries_start_number() {
        let nodes = parse("3. a\n4. b");
        assert_eq!(
            nodes,
            vec![RawNode::List {
                ordered: true,
                start: Some(3),
                tight: true,
                children: vec![
                    RawNode::ListItem {
                        children: vec![RawNode::Paragraph { raw: "a".into() }],
                    },
                    RawNode::ListItem {
                        children: vec![RawNode::Paragraph { raw: "b".into() }],
                    },
                ],
            }]
        );
    }

    #[test]
    fn ordered_and_unordered_markers_start_separate_lists() {
        let nodes = parse("- a\n1. b");
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn html_block_is_single_line() {
        let nodes = parse("<div>\nnot html</div>");
        assert_eq!(
            nodes,
            vec![
                RawNode::HtmlBlock { value: "<div>".into() },
                RawNode::Paragraph {
                    raw: "not html</div>".into()
                },
            ]
        );
    }

    #[test]
    fn reference_definition_consumes_whole_paragraph() {
        let nodes = parse("[foo]: /url \"title\"");
        assert!(nodes.is_empty());
    }

    #[test]
    fn reference_definition_before_text_leaves_paragraph_behind() {
        let (nodes, defs) = {
            let lines: Vec<String> = "[foo]: /url\nSome text"
                .split('\n')
                .map(str::to_string)
                .collect();
            super::super::parse_blocks(&lines)
        };
        assert_eq!(nodes, vec![RawNode::Paragraph { raw: "Some text".into() }]);
        assert!(defs.contains_key("foo"));
    }
}
