// ============================================================
// Layer 4 — Pair Batcher
// ============================================================
// Converts a slice of NliSamples into tensor batches.
//
// How batching works here:
//   Input:  N samples with variable-length id sequences
//   Output: SentencePairBatch with two [N, pad_width] id
//           tensors and the TRUE length of every sequence
//
// Unlike fixed-width corpora, NLI sentences vary a lot, so we
// pad each side to a configured width and keep the true lengths
// alongside. The model later slices each side down to the
// batch-local maximum before embedding, and the encoder uses
// the true lengths to ignore padding.
//
// This is also the contract gate: raw ids are still host-side
// Vec<u32> here, so out-of-vocabulary ids and over-long
// sequences are caught BEFORE any tensor indexing happens.
// An id past the embedding table would otherwise fail deep in
// the backend (or worse, not at all).
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::data::dataset::NliSample;
use crate::data::vocab::PAD_ID;

// ─── SentencePairBatch ────────────────────────────────────────────────────────
/// A batch of sentence pairs ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct SentencePairBatch<B: Backend> {
    /// Premise token ids — shape: [batch_size, pad_width]
    pub premise_ids: Tensor<B, 2, Int>,

    /// True premise lengths, one per example, each in [1, pad_width]
    pub premise_lengths: Vec<usize>,

    /// Hypothesis token ids — shape: [batch_size, pad_width]
    pub hypothesis_ids: Tensor<B, 2, Int>,

    /// True hypothesis lengths, one per example
    pub hypothesis_lengths: Vec<usize>,

    /// Gold class index per example, where the source had one
    pub labels: Vec<Option<usize>>,
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct device, plus the two values it
/// validates against.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,

    /// Size of the embedding table; every id must be below this
    pub vocab_size: usize,

    /// Width both sides are padded to
    pub pad_width: usize,
}

impl<B: Backend> PairBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device, vocab_size: usize, pad_width: usize) -> Self {
        Self {
            device,
            vocab_size,
            pad_width,
        }
    }

    /// Convert samples into a single SentencePairBatch.
    ///
    /// Fails (instead of recovering) when a sample violates the
    /// input contract:
    ///   - empty batch or empty sequence
    ///   - sequence longer than the pad width
    ///   - token id outside [0, vocab_size)
    pub fn batch(&self, items: &[NliSample]) -> Result<SentencePairBatch<B>> {
        ensure!(!items.is_empty(), "cannot batch zero samples");

        let (premise_ids, premise_lengths) =
            self.pad_side(items.iter().map(|s| s.premise_ids.as_slice()), "premise")?;
        let (hypothesis_ids, hypothesis_lengths) = self.pad_side(
            items.iter().map(|s| s.hypothesis_ids.as_slice()),
            "hypothesis",
        )?;

        let labels = items.iter().map(|s| s.label).collect();

        Ok(SentencePairBatch {
            premise_ids,
            premise_lengths,
            hypothesis_ids,
            hypothesis_lengths,
            labels,
        })
    }

    /// Validate and pad one side of the batch, returning the
    /// stacked id tensor and the true lengths.
    fn pad_side<'a>(
        &self,
        rows: impl Iterator<Item = &'a [u32]>,
        role: &str,
    ) -> Result<(Tensor<B, 2, Int>, Vec<usize>)> {
        let mut flat: Vec<i32> = Vec::new();
        let mut lengths        = Vec::new();

        for (index, ids) in rows.enumerate() {
            ensure!(
                !ids.is_empty(),
                "{role} {index} has no tokens — an empty sentence cannot be encoded"
            );
            ensure!(
                ids.len() <= self.pad_width,
                "{role} {index} has {} tokens but the pad width is {}",
                ids.len(),
                self.pad_width
            );

            for &id in ids {
                ensure!(
                    (id as usize) < self.vocab_size,
                    "{role} {index} contains token id {} outside the vocabulary (size {})",
                    id,
                    self.vocab_size
                );
                flat.push(id as i32);
            }
            // Fill the tail with the padding id
            flat.extend(std::iter::repeat(PAD_ID as i32).take(self.pad_width - ids.len()));
            lengths.push(ids.len());
        }

        let batch_size = lengths.len();
        let tensor = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, self.pad_width]);

        Ok((tensor, lengths))
    }
}
