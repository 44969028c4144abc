//! Strict single-line HTML block recognition (spec.md §4.2 step C.8).
//!
//! Unlike CommonMark's seven-rule HTML block grammar, this core recognizes
//! an HTML block only as a single line: the whole line must look like an
//! opening/closing tag, comment, processing instruction, declaration, or
//! CDATA section. Multi-line HTML blocks are not supported (spec.md
//! Non-goals). Tag names are restricted to spec.md's curated list —
//! generic inline tags like `span`/`a`/`b`/`br` do not open a block, and
//! (via [`is_opener`]) do not qualify as inline raw HTML either.

use regex::Regex;
use std::sync::LazyLock;

static OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^\s{0,3}(
            <!--                      # comment
          | <\?                       # processing instruction
          | <!\[CDATA\[                # CDATA section
          | <![A-Za-z]                 # declaration
          | <(script|pre|style|textarea)\b
          | </?(address|article|aside|base|blockquote|body|caption|center|col
               |colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption
               |figure|footer|form|header|hr|html|legend|li|menu|nav|ol|p
               |section|summary|table|tbody|td|tfoot|th|thead|tr)[\s/>]
        )",
    )
    .unwrap()
});

pub fn is_opener(remainder: &str) -> bool {
    OPENER.is_match(remainder)
}
