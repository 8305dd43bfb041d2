// ============================================================
// Layer 3 — Label Domain Type
// ============================================================
// Clients may submit labels either as JSON strings ("aleph")
// or as JSON integers (7). The untagged serde representation
// accepts both without a wrapper object.
//
// Label is Ord + Hash so the vocabulary can sort distinct
// labels deterministically and the store can count them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The class label attached to a submitted grid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Numeric label, e.g. a digit class
    Number(i64),

    /// Textual label, e.g. a letter name
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{n}"),
            Label::Text(s)   => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<i64> for Label {
    fn from(n: i64) -> Self {
        Label::Number(n)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_label() {
        let label: Label = serde_json::from_str(r#""aleph""#).unwrap();
        assert_eq!(label, Label::from("aleph"));
    }

    #[test]
    fn test_deserialize_numeric_label() {
        let label: Label = serde_json::from_str("7").unwrap();
        assert_eq!(label, Label::Number(7));
    }

    #[test]
    fn test_display_matches_json_key_form() {
        assert_eq!(Label::from("bet").to_string(), "bet");
        assert_eq!(Label::Number(3).to_string(), "3");
    }

    #[test]
    fn test_ordering_is_total() {
        // Numeric labels sort before textual ones, numbers by value,
        // strings lexicographically.
        let mut labels = vec![Label::from("b"), Label::Number(2), Label::from("a"), Label::Number(1)];
        labels.sort();
        assert_eq!(
            labels,
            vec![Label::Number(1), Label::Number(2), Label::from("a"), Label::from("b")]
        );
    }
}
