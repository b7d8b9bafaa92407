use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// The target of a link reference definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDefinition {
    pub destination: String,
    pub title: Option<String>,
}

/// `[label]: destination "optional title"` on a single line.
pub struct ReferenceLine;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\[((?:\\.|[^\\\[\]])+)\]:[ \t]*(<[^<>]*>|\S+)(?:[ \t]+("[^"]*"|'[^']*'|\([^()]*\)))?[ \t]*$"#,
    )
    .expect("reference definition pattern is valid")
});

impl ReferenceLine {
    /// Parses a reference definition, returning its normalized label and
    /// definition.
    pub fn scan(s: &str) -> Option<(String, ReferenceDefinition)> {
        let caps = REFERENCE_RE.captures(s)?;
        let label = normalize_label(caps.get(1)?.as_str());
        if label.is_empty() {
            return None;
        }

        let raw_dest = caps.get(2)?.as_str();
        let destination = raw_dest
            .strip_prefix('<')
            .and_then(|d| d.strip_suffix('>'))
            .unwrap_or(raw_dest)
            .to_string();
        let title = caps.get(3).map(|t| {
            let t = t.as_str();
            t[1..t.len() - 1].to_string()
        });

        Some((label, ReferenceDefinition { destination, title }))
    }
}

/// Case-folds a label and collapses internal whitespace, so that
/// `[Foo  Bar]` and `[foo bar]` refer to the same definition.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
