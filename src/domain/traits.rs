// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// by programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - TsvPairLoader implements PairSource
//   - A future JsonlPairLoader could also implement PairSource
//   - The application layer only sees PairSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use serde::Serialize;

use crate::domain::label::Label;
use crate::domain::sentence_pair::{LabeledPair, SentencePair};

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can load labeled sentence pairs.
///
/// Implementations:
///   - TsvPairLoader → reads SNLI-style tab-separated files
///   - (future) JsonlPairLoader → reads the original JSONL release
pub trait PairSource {
    /// Load all labeled pairs from this source.
    fn load_all(&self) -> Result<Vec<LabeledPair>>;
}

// ─── RelationClassifier ───────────────────────────────────────────────────────
/// Any component that can decide the relation of a sentence pair.
///
/// Implementations:
///   - ClassifyUseCase → uses the embedding + encoder + head model
///   - (future) RuleBasedClassifier → uses lexical overlap heuristics
pub trait RelationClassifier {
    /// Classify one pair, returning the predicted label and the
    /// full probability distribution over classes.
    fn classify(&self, pair: &SentencePair) -> Result<Prediction>;
}

/// The outcome of classifying one sentence pair.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// The argmax class
    pub label: Label,

    /// Probability per class, in class-index order; entries are
    /// non-negative and sum to 1
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Probability assigned to the predicted class
    pub fn confidence(&self) -> f32 {
        self.probabilities
            .get(self.label.index())
            .copied()
            .unwrap_or(0.0)
    }
}
