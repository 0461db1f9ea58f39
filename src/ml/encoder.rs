// ============================================================
// Layer 5 — Sentence Encoder Contract
// ============================================================
// The classifier treats the sentence encoder as an opaque
// collaborator with exactly one capability:
//
//   encode: [batch, seq_len, dim] + true lengths → [batch, dim]
//
// The trait keeps the composition and classification code
// independent of the encoder's internals — a recurrent or
// attention-based encoder slots in without touching the model,
// as long as it honours two rules:
//
//   1. It must tolerate seq_len being the batch-local maximum
//      length (the model truncates padding columns first)
//   2. Positions at or past an example's true length are
//      padding and must not influence that example's vector
//
// The model calls the SAME encoder instance for premise and
// hypothesis, so an encoder with parameters is automatically
// weight-shared between the two sentences.
//
// Reference: Rust Book §10 (Traits)
//            Conneau et al. (2017) InferSent §3

use burn::prelude::*;

// ─── SentenceEncoder ──────────────────────────────────────────────────────────
/// Any component that can summarise an embedded, padded token
/// sequence into one fixed-size vector per sentence.
///
/// Implementations:
///   - MeanPoolEncoder → average over the true tokens
///   - (test stubs)    → fixed vectors for hand-checked math
pub trait SentenceEncoder<B: Backend> {
    /// `embedded` has shape [batch, seq_len, dim]; `lengths` holds one
    /// true length per example. Returns shape [batch, dim], row i
    /// encoding example i.
    fn encode(&self, embedded: Tensor<B, 3>, lengths: &[usize]) -> Tensor<B, 2>;
}

// ─── MeanPoolEncoder ──────────────────────────────────────────────────────────
/// Parameter-free reference encoder: the mean of the true token
/// embeddings. Padding positions are masked out before the sum,
/// and each sum is divided by the TRUE length, not seq_len.
pub struct MeanPoolEncoder;

impl MeanPoolEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MeanPoolEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> SentenceEncoder<B> for MeanPoolEncoder {
    fn encode(&self, embedded: Tensor<B, 3>, lengths: &[usize]) -> Tensor<B, 2> {
        let [batch_size, seq_len, dim] = embedded.dims();
        let device = embedded.device();

        // Binary mask [batch, seq_len]: 1 for true tokens, 0 for padding
        let mut mask = vec![0.0f32; batch_size * seq_len];
        for (i, &length) in lengths.iter().enumerate() {
            for j in 0..length.min(seq_len) {
                mask[i * seq_len + j] = 1.0;
            }
        }
        let mask = Tensor::<B, 2>::from_data(
            TensorData::new(mask, [batch_size, seq_len]),
            &device,
        )
        .reshape([batch_size, seq_len, 1]);

        // Zero the padding rows, then sum over the sequence axis
        let summed = (embedded * mask)
            .sum_dim(1)
            .reshape([batch_size, dim]);

        // Divide by the true length (clamped to 1 so the math stays
        // finite even if a caller slips an empty sentence through)
        let divisor: Vec<f32> = lengths.iter().map(|&l| l.max(1) as f32).collect();
        let divisor = Tensor::<B, 1>::from_floats(divisor.as_slice(), &device)
            .reshape([batch_size, 1]);

        summed / divisor
    }
}
