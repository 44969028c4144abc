//! Two-phase Markdown to HTML parser pipeline (spec.md §1-§2).
//!
//! `parse_markdown` is the only entry point a caller needs: normalize lines,
//! build the raw block tree, resolve each block's inline content, render to
//! HTML. The phases are exposed individually as `block`, `inline`, `render`
//! and `tree` so tests can exercise them without going through the whole
//! pipeline, mirroring how `markdown-neuraxis-engine` splits parsing from
//! rendering/editing concerns.

pub mod block;
mod inline;
mod line;
pub mod render;
pub mod tree;

use tree::Document;

/// Parses `source` as Markdown and renders it to an HTML string.
///
/// Total: every `&str` input produces a `String` output with no panics and
/// no error channel (spec.md §7).
pub fn parse_markdown(source: &str) -> String {
    let document = parse_document(source);
    render::render_document(&document)
}

/// Runs the block and inline phases without rendering, for callers that want
/// the typed tree itself (tests, or a future consumer of `ref_definitions`).
pub fn parse_document(source: &str) -> Document {
    let lines = line::normalize_lines(source);
    let (raw_blocks, ref_definitions) = block::parse_blocks(&lines);
    let children = inline::resolve_tree(raw_blocks);
    Document {
        children,
        ref_definitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn atx_heading() {
        assert_eq!(parse_markdown("# Hello"), "<h1>Hello</h1>");
    }

    #[test]
    fn emphasis_and_strong() {
        assert_eq!(
            parse_markdown("**bold** and *em*"),
            "<p><strong>bold</strong> and <em>em</em></p>"
        );
    }

    #[test]
    fn fenced_code_with_language() {
        assert_eq!(
            parse_markdown("```js\nlet x=1;\n```"),
            "<pre><code class=\"language-js\">let x=1;\n</code></pre>"
        );
    }

    #[test]
    fn tight_unordered_list() {
        assert_eq!(
            parse_markdown("- a\n- b\n"),
            "<ul><li><p>a</p></li><li><p>b</p></li></ul>"
        );
    }

    #[test]
    fn reference_definition_produces_empty_document_and_ref_map() {
        let document = parse_document("[foo]: /u \"t\"\n");
        assert!(document.children.is_empty());
        let def = document.ref_definitions.get("foo").expect("definition present");
        assert_eq!(def.url, "/u");
        assert_eq!(def.title.as_deref(), Some("t"));
    }

    #[test]
    fn triple_delimiter_greedy_pair_off() {
        assert_eq!(
            parse_markdown("***x***"),
            "<p><strong><em>x</em></strong></p>"
        );
    }

    #[test]
    fn autolink() {
        assert_eq!(
            parse_markdown("<http://example.com>"),
            "<p><a href=\"http://example.com\">http://example.com</a></p>"
        );
    }

    #[test]
    fn indented_code_block() {
        assert_eq!(
            parse_markdown("    code\n"),
            "<pre><code>code\n</code></pre>"
        );
    }

    #[test]
    fn totality_does_not_panic_on_arbitrary_bytes() {
        let inputs = [
            "",
            "\0",
            "***",
            "[[[",
            "````",
            "> > >",
            "\u{FFFD}",
            "a\r\nb\rc\n",
        ];
        for input in inputs {
            let _ = parse_markdown(input);
        }
    }
}
