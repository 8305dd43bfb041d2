// ============================================================
// Layer 3 — Label Vocabulary
// ============================================================
// Bijective mapping between labels and dense class indices
// 0..K-1. Built fresh at training time from the distinct
// labels in the store, in sorted order so the same set of
// labels always produces the same index assignment, no matter
// what order the examples were submitted in.
//
// The vocabulary is persisted as JSON next to the model
// weights, so predictions can decode indices after a process
// restart without retraining.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::domain::label::Label;

/// Sorted bijection between labels and class indices.
///
/// Serialises as the plain ordered label list; the inverse
/// map is rebuilt on deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Label>", into = "Vec<Label>")]
pub struct LabelVocabulary {
    /// index -> label, in sorted label order
    labels: Vec<Label>,

    /// label -> index, derived from `labels`
    index_of: HashMap<Label, usize>,
}

impl LabelVocabulary {
    /// Build a vocabulary from the labels observed in the store.
    /// Duplicates collapse; the distinct labels are sorted before
    /// indices are assigned.
    pub fn from_observed<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let distinct: BTreeSet<Label> = labels.into_iter().cloned().collect();
        Self::from_sorted(distinct.into_iter().collect())
    }

    fn from_sorted(labels: Vec<Label>) -> Self {
        let index_of = labels
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, l)| (l, i))
            .collect();
        Self { labels, index_of }
    }

    /// Number of distinct classes (K).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label -> class index. `None` for a label the vocabulary
    /// has never seen.
    pub fn encode(&self, label: &Label) -> Option<usize> {
        self.index_of.get(label).copied()
    }

    /// Class index -> label. `None` for an index outside 0..K-1.
    pub fn decode(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Labels in index order, for logging and tests.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl From<Vec<Label>> for LabelVocabulary {
    fn from(labels: Vec<Label>) -> Self {
        Self::from_sorted(labels)
    }
}

impl From<LabelVocabulary> for Vec<Label> {
    fn from(vocab: LabelVocabulary) -> Self {
        vocab.labels
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_label_gives_size_one() {
        let labels = vec![Label::from("A"), Label::from("A"), Label::from("A")];
        let vocab = LabelVocabulary::from_observed(&labels);
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.encode(&Label::from("A")), Some(0));
    }

    #[test]
    fn test_three_labels_give_size_three() {
        let labels = vec![Label::from("C"), Label::from("A"), Label::from("B"), Label::from("A")];
        let vocab = LabelVocabulary::from_observed(&labels);
        assert_eq!(vocab.len(), 3);
        for label in [Label::from("A"), Label::from("B"), Label::from("C")] {
            let idx = vocab.encode(&label).unwrap();
            assert_eq!(vocab.decode(idx), Some(&label));
        }
    }

    #[test]
    fn test_index_assignment_is_order_independent() {
        let forward  = vec![Label::from("A"), Label::from("B"), Label::from("C")];
        let backward = vec![Label::from("C"), Label::from("B"), Label::from("A")];
        let v1 = LabelVocabulary::from_observed(&forward);
        let v2 = LabelVocabulary::from_observed(&backward);
        assert_eq!(v1.labels(), v2.labels());
    }

    #[test]
    fn test_unknown_label_and_index() {
        let labels = vec![Label::from("A")];
        let vocab = LabelVocabulary::from_observed(&labels);
        assert_eq!(vocab.encode(&Label::from("Z")), None);
        assert!(vocab.decode(1).is_none());
    }

    #[test]
    fn test_json_round_trip_rebuilds_inverse_map() {
        let labels = vec![Label::from("beta"), Label::Number(4), Label::from("alpha")];
        let vocab = LabelVocabulary::from_observed(&labels);
        let json  = serde_json::to_string(&vocab).unwrap();
        let back: LabelVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.labels(), vocab.labels());
        for label in vocab.labels() {
            assert_eq!(back.encode(label), vocab.encode(label));
        }
    }
}

// ─── Property Tests ───────────────────────────────────────────────────────────
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_encode_decode_round_trip(raw in proptest::collection::vec("[a-z]{1,8}", 1..32)) {
            let labels: Vec<Label> = raw.iter().map(|s| Label::from(s.as_str())).collect();
            let vocab = LabelVocabulary::from_observed(&labels);
            for label in &labels {
                let idx = vocab.encode(label).unwrap();
                prop_assert_eq!(vocab.decode(idx), Some(label));
            }
        }

        #[test]
        fn prop_size_equals_distinct_count(raw in proptest::collection::vec("[a-z]{1,4}", 1..64)) {
            let labels: Vec<Label> = raw.iter().map(|s| Label::from(s.as_str())).collect();
            let distinct: std::collections::BTreeSet<&Label> = labels.iter().collect();
            let vocab = LabelVocabulary::from_observed(&labels);
            prop_assert_eq!(vocab.len(), distinct.len());
        }

        #[test]
        fn prop_indices_are_dense(raw in proptest::collection::vec("[a-z]{1,4}", 1..32)) {
            let labels: Vec<Label> = raw.iter().map(|s| Label::from(s.as_str())).collect();
            let vocab = LabelVocabulary::from_observed(&labels);
            let mut seen: Vec<usize> = labels.iter().filter_map(|l| vocab.encode(l)).collect();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen, (0..vocab.len()).collect::<Vec<_>>());
        }
    }
}
