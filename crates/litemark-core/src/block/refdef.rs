//! Reference-definition extraction (spec.md §4.3).
//!
//! When a paragraph closes, its raw lines are tested independently against
//! the definition pattern. Matching lines are peeled out as definitions;
//! non-matching lines are retained in place as ordinary paragraph text. A
//! paragraph whose retained lines are all consumed is deleted rather than
//! rendered.

use crate::tree::{normalize_label, RefDefinition};
use regex::Regex;
use std::sync::LazyLock;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ^\ {0,3}
        \[([^\]]+)\]:
        \s*
        (?:
            <(.*?)>
          | (\S+)
        )
        \s*
        (?:
            "([^"]*)"
          | '([^']*)'
          | \(([^)]*)\)
        )?
        \s*$
        "#,
    )
    .unwrap()
});

/// The outcome of scanning a closed paragraph's lines for leading reference
/// definitions.
pub struct Extracted {
    pub definitions: Vec<(String, RefDefinition)>,
    /// The lines left over after peeling off definitions, or `None` if the
    /// whole paragraph was consumed.
    pub remaining: Option<Vec<String>>,
}

pub fn extract(lines: &[String]) -> Extracted {
    let mut definitions = Vec::new();
    let mut retained = Vec::new();
    for line in lines {
        let Some(caps) = DEFINITION.captures(line) else {
            retained.push(line.clone());
            continue;
        };
        let label = normalize_label(&caps[1]);
        let url = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let title = caps
            .get(4)
            .or_else(|| caps.get(5))
            .or_else(|| caps.get(6))
            .map(|m| m.as_str().to_string());
        definitions.push((label, RefDefinition { url, title }));
    }
    let remaining = if retained.is_empty() {
        None
    } else {
        Some(retained)
    };
    Extracted {
        definitions,
        remaining,
    }
}
