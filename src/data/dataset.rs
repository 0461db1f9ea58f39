// ============================================================
// Layer 4 — NLI Dataset
// ============================================================
// One fully tokenized sample plus Burn's Dataset trait over a
// collection of them.
//
// Samples hold plain Vec<u32> ids, NOT tensors — padding and
// tensor construction happen later in the batcher, because the
// pad width depends on the batch the sample ends up in.
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::data::vocab::Vocabulary;
use crate::domain::sentence_pair::LabeledPair;

/// One tokenized premise/hypothesis example.
/// Sequences are unpadded; true lengths are just `.len()` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NliSample {
    pub premise_ids:    Vec<u32>,
    pub hypothesis_ids: Vec<u32>,

    /// Gold class index, absent for bare classification input
    pub label: Option<usize>,
}

pub struct NliDataset {
    samples: Vec<NliSample>,
}

impl NliDataset {
    pub fn new(samples: Vec<NliSample>) -> Self {
        Self { samples }
    }

    /// Tokenize and encode labeled pairs into samples.
    /// Sentences longer than `max_seq_len` tokens are truncated —
    /// the batcher later rejects anything wider than its pad width,
    /// so the cap is enforced here where the token lists still exist.
    pub fn from_pairs(
        pairs:        &[LabeledPair],
        vocab:        &Vocabulary,
        preprocessor: &Preprocessor,
        max_seq_len:  usize,
    ) -> Self {
        let samples = pairs
            .iter()
            .map(|pair| {
                let mut premise_ids =
                    vocab.encode(&preprocessor.tokenize(&pair.premise));
                let mut hypothesis_ids =
                    vocab.encode(&preprocessor.tokenize(&pair.hypothesis));
                premise_ids.truncate(max_seq_len);
                hypothesis_ids.truncate(max_seq_len);

                NliSample {
                    premise_ids,
                    hypothesis_ids,
                    label: Some(pair.label.index()),
                }
            })
            .collect();

        Self::new(samples)
    }
}

impl Dataset<NliSample> for NliDataset {
    fn get(&self, index: usize) -> Option<NliSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
