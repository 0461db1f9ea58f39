// ============================================================
// Layer 3 — Sentence Pair Domain Types
// ============================================================
// Natural language inference works on PAIRS of sentences:
//   - The premise states something taken as given
//   - The hypothesis is judged against the premise
//
// The two roles are NOT interchangeable: "a dog is running"
// entails "an animal is moving", but not the other way round.
// The model preserves this asymmetry all the way through the
// relation vector, so the domain types keep the roles named
// rather than using a generic (left, right) tuple.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

/// An unlabeled premise/hypothesis pair — the input to classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePair {
    /// The sentence taken as given
    pub premise: String,

    /// The sentence judged against the premise
    pub hypothesis: String,
}

impl SentencePair {
    pub fn new(premise: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        Self {
            premise:    premise.into(),
            hypothesis: hypothesis.into(),
        }
    }
}

/// A gold-labeled pair — one evaluation (or training) example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledPair {
    pub premise:    String,
    pub hypothesis: String,

    /// The gold relation annotated in the corpus
    pub label: Label,
}

impl LabeledPair {
    pub fn new(
        premise:    impl Into<String>,
        hypothesis: impl Into<String>,
        label:      Label,
    ) -> Self {
        Self {
            premise:    premise.into(),
            hypothesis: hypothesis.into(),
            label,
        }
    }

    /// View this example as an unlabeled pair for the classifier
    pub fn pair(&self) -> SentencePair {
        SentencePair::new(self.premise.clone(), self.hypothesis.clone())
    }
}
