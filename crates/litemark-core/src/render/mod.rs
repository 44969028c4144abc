//! HTML renderer (spec.md §4.6): a recursive walk over the typed tree that
//! emits HTML, escaping text/attributes and sanitizing URLs as it goes.
//!
//! The teacher has no renderer of its own (it edits Markdown rather than
//! turning it into HTML); this module is grounded on the escaping idiom
//! already present in the workspace's `html-escape` dependency, used the way
//! `Ranrar-Marco::components::marco_engine::render` calls
//! `html_escape::encode_text` before interpolating user content into tags.

use crate::tree::{Document, Node};

/// Renders a whole document: concatenates top-level children, joining
/// consecutive children with a single LF (spec.md §4.6).
pub fn render_document(doc: &Document) -> String {
    let parts: Vec<String> = doc.children.iter().map(render_node).collect();
    parts.join("\n")
}

fn render_children(children: &[Node]) -> String {
    children.iter().map(render_node).collect()
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Paragraph { children } => format!("<p>{}</p>", render_children(children)),
        Node::Heading { level, children } => {
            format!("<h{level}>{}</h{level}>", render_children(children))
        }
        Node::BlockQuote { children } => {
            format!("<blockquote>{}</blockquote>", render_children(children))
        }
        Node::List {
            ordered,
            start,
            children,
            ..
        } => {
            let inner = render_children(children);
            if *ordered {
                match start {
                    Some(n) if *n != 1 => format!("<ol start=\"{n}\">{inner}</ol>"),
                    _ => format!("<ol>{inner}</ol>"),
                }
            } else {
                format!("<ul>{inner}</ul>")
            }
        }
        Node::ListItem { children } => format!("<li>{}</li>", render_children(children)),
        Node::ThematicBreak => "<hr />".to_string(),
        Node::HtmlBlock { value } => value.clone(),
        Node::CodeBlock {
            language,
            value,
            ..
        } => match language {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape(lang),
                escape(value)
            ),
            None => format!("<pre><code>{}</code></pre>", escape(value)),
        },
        Node::Text { value } => escape(value),
        Node::Emphasis { children } => format!("<em>{}</em>", render_children(children)),
        Node::Strong { children } => format!("<strong>{}</strong>", render_children(children)),
        Node::CodeSpan { code } => format!("<code>{}</code>", escape(code)),
        Node::Linebreak => "<br />".to_string(),
        Node::RawHtml { content } => content.clone(),
        Node::Link {
            url,
            title,
            children,
        } => {
            let title_attr = title
                .as_deref()
                .map(|t| format!(" title=\"{}\"", escape(t)))
                .unwrap_or_default();
            format!(
                "<a href=\"{}\"{title_attr}>{}</a>",
                escape_url(url),
                render_children(children)
            )
        }
        Node::Image { url, title, alt } => {
            let title_attr = title
                .as_deref()
                .map(|t| format!(" title=\"{}\"", escape(t)))
                .unwrap_or_default();
            format!(
                "<img src=\"{}\" alt=\"{}\"{title_attr} />",
                escape_url(url),
                escape(alt)
            )
        }
    }
}

/// Text/attribute escape (spec.md §4.6): `&`, `<`, `>`, `"`, `'`.
fn escape(s: &str) -> String {
    html_escape::encode_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// URL escape (spec.md §4.6): only `"` is replaced, with `%22`.
fn escape_url(s: &str) -> String {
    s.replace('"', "%22")
}
