// ============================================================
// Layer 3 — Relation Label
// ============================================================
// The classifier decides which of three semantic relations
// holds between a premise and a hypothesis:
//
//   entailment    — the premise implies the hypothesis
//   neutral       — the hypothesis could be true, but does
//                   not follow from the premise
//   contradiction — the premise rules the hypothesis out
//
// Example:
//   Premise:    "A man is playing a guitar on stage."
//   Hypothesis: "A person is performing music."  → entailment
//   Hypothesis: "The man is famous."             → neutral
//   Hypothesis: "Nobody is making any sound."    → contradiction
//
// The label doubles as the class index for the softmax output,
// so the ordering here is part of the model contract.
//
// Reference: Bowman et al. (2015) SNLI corpus paper
//            Rust Book §6 (Enums)

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of target classes in the softmax output layer
pub const CLASS_COUNT: usize = 3;

/// The three-way relation between premise and hypothesis.
/// The discriminant order fixes the class-index mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Entailment,
    Neutral,
    Contradiction,
}

impl Label {
    /// The class index this label occupies in the probability vector
    pub fn index(&self) -> usize {
        match self {
            Label::Entailment    => 0,
            Label::Neutral       => 1,
            Label::Contradiction => 2,
        }
    }

    /// Inverse of index() — turns an argmax result back into a label.
    /// Out-of-range indices are a caller bug, reported as an error.
    pub fn from_index(index: usize) -> anyhow::Result<Self> {
        match index {
            0 => Ok(Label::Entailment),
            1 => Ok(Label::Neutral),
            2 => Ok(Label::Contradiction),
            _ => bail!("class index {index} outside [0, {CLASS_COUNT})"),
        }
    }

    /// The corpus spelling of this label (lower case, as in SNLI files)
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Entailment    => "entailment",
            Label::Neutral       => "neutral",
            Label::Contradiction => "contradiction",
        }
    }

    /// All labels in class-index order
    pub fn all() -> [Label; CLASS_COUNT] {
        [Label::Entailment, Label::Neutral, Label::Contradiction]
    }
}

impl FromStr for Label {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "entailment"    => Ok(Label::Entailment),
            "neutral"       => Ok(Label::Neutral),
            "contradiction" => Ok(Label::Contradiction),
            other => bail!("unknown relation label '{other}'"),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for label in Label::all() {
            assert_eq!(Label::from_index(label.index()).unwrap(), label);
        }
    }

    #[test]
    fn test_parse_corpus_spelling() {
        assert_eq!("entailment".parse::<Label>().unwrap(), Label::Entailment);
        assert_eq!("contradiction".parse::<Label>().unwrap(), Label::Contradiction);
    }

    #[test]
    fn test_rejects_unknown_label() {
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        assert!(Label::from_index(CLASS_COUNT).is_err());
    }
}
