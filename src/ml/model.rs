// ============================================================
// Layer 5 — Sentence-Pair Classifier
// ============================================================
// The InferSent-style architecture for natural language
// inference:
//
//   premise ids ──┐ truncate → embed → encode ──► u
//                 │                                │
//   hypothesis ───┘ truncate → embed → encode ──► v
//                                                  │
//        relation = concat(u, v, |u − v|, u * v)   │  [batch, 4D]
//                                                  ▼
//   dropout → linear 4D→H → layer norm → ReLU → dropout
//          → linear H→C → softmax                     [batch, C]
//
// Three contracts this file pins down, because getting any of
// them wrong degrades accuracy silently instead of erroring:
//
//   1. The embedding table is copied from pretrained vectors,
//      frozen, and ONLY its unknown-token row (index 1) is
//      re-initialized uniformly in [-0.05, 0.05]. The padding
//      row keeps whatever the source supplied.
//   2. The relation concatenation order is fixed: u, v, |u−v|,
//      u*v. Swapping premise and hypothesis changes the vector
//      on purpose — the two roles are not interchangeable.
//   3. The head order is linear → layer norm → ReLU, with
//      dropout before the first linear and after the ReLU.
//
// Dropout is driven by an explicit RunMode argument instead of
// an ambient training flag, so every forward call states which
// behaviour it wants and tests can cover both paths.
//
// Reference: Burn Book §3 (Building Blocks)
//            Conneau et al. (2017) InferSent
//            Ba et al. (2016) Layer Normalization

use anyhow::{ensure, Result};
use burn::{
    module::Param,
    nn::{
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::{activation, Distribution},
};

use crate::data::batcher::SentencePairBatch;
use crate::infra::embedding_store::EmbeddingTable;
use crate::ml::encoder::SentenceEncoder;

/// Index of the reserved unknown-token row in the embedding table
const UNKNOWN_ROW: usize = 1;

/// Half-width of the uniform range the unknown row is drawn from
const UNKNOWN_INIT_RANGE: f64 = 0.05;

// ─── RunMode ──────────────────────────────────────────────────────────────────
/// Whether a forward pass behaves as training or inference.
/// The only difference is dropout: stochastic in Train,
/// identity in Inference. Callers choose explicitly — the model
/// never infers the mode from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Train,
    Inference,
}

// ─── ModeDropout ──────────────────────────────────────────────────────────────
/// Inverted dropout gated on an explicit RunMode.
///
/// Same mask arithmetic as burn's own Dropout (Bernoulli keep
/// mask, scaled by 1/keep so the expected activation is
/// unchanged), but switched by the mode argument rather than by
/// whether the backend tracks gradients.
#[derive(Module, Clone, Debug)]
pub struct ModeDropout {
    prob: f64,
}

impl ModeDropout {
    pub fn new(prob: f64) -> Self {
        Self { prob }
    }

    pub fn forward<B: Backend, const D: usize>(
        &self,
        input: Tensor<B, D>,
        mode: RunMode,
    ) -> Tensor<B, D> {
        // At prob = 0 the general formula is already the identity;
        // the early return just skips sampling a useless mask.
        if mode == RunMode::Inference || self.prob == 0.0 {
            return input;
        }

        let keep = 1.0 - self.prob;
        let mask = input.random_like(Distribution::Bernoulli(keep));
        input * mask / keep
    }
}

// ─── Relation Composer ────────────────────────────────────────────────────────
/// Build the relation vector from two encoded sentence batches.
///
/// `u` is the encoded premise, `v` the encoded hypothesis, both
/// [batch, dim]. Output is [batch, 4*dim], rows aligned with the
/// input rows:
///
///   [ u | v | |u − v| | u * v ]
///
/// The |u − v| block is symmetric under swapping the arguments,
/// the full vector is NOT — u and v occupy fixed positions.
/// A dimension mismatch fails loudly; broadcasting two encoders
/// that disagree on dim would corrupt every downstream number.
pub fn compose_relation<B: Backend>(
    u: Tensor<B, 2>,
    v: Tensor<B, 2>,
) -> Result<Tensor<B, 2>> {
    let [u_batch, u_dim] = u.dims();
    let [v_batch, v_dim] = v.dims();
    ensure!(
        u_batch == v_batch,
        "encoded premise batch ({u_batch}) != encoded hypothesis batch ({v_batch})"
    );
    ensure!(
        u_dim == v_dim,
        "encoded premise dim ({u_dim}) != encoded hypothesis dim ({v_dim})"
    );

    let diff = (u.clone() - v.clone()).abs();
    let prod = u.clone() * v.clone();

    Ok(Tensor::cat(vec![u, v, diff, prod], 1))
}

/// Drop padding columns beyond the batch-local longest sentence.
/// A compute saving, not a correctness requirement — the encoder
/// must tolerate receiving exactly this truncated width.
pub fn truncate_to_batch_max<B: Backend>(
    ids: Tensor<B, 2, Int>,
    lengths: &[usize],
) -> Tensor<B, 2, Int> {
    let [batch_size, width] = ids.dims();
    let max_len = lengths.iter().copied().max().unwrap_or(0).min(width);
    if max_len == width {
        return ids;
    }
    ids.slice([0..batch_size, 0..max_len])
}

// ─── Classification Head ──────────────────────────────────────────────────────
/// The two-layer feed-forward head over the relation vector.
/// Stateless per call; its parameters are the only persisted
/// state. Order matters: linear → normalize → activate.
#[derive(Module, Debug)]
pub struct ClassifierHead<B: Backend> {
    pub dropout:    ModeDropout,
    pub linear1:    Linear<B>,
    pub layer_norm: LayerNorm<B>,
    pub linear2:    Linear<B>,
}

impl<B: Backend> ClassifierHead<B> {
    /// relation: [batch, 4*dim] → class probabilities [batch, C].
    /// Every output row is non-negative and sums to 1.
    pub fn forward(&self, relation: Tensor<B, 2>, mode: RunMode) -> Tensor<B, 2> {
        let x = self.dropout.forward(relation, mode);
        let x = self.linear1.forward(x);
        // Normalize the HIDDEN representation — not the raw
        // relation vector and not the logits
        let x = self.layer_norm.forward(x);
        let x = activation::relu(x);
        let x = self.dropout.forward(x, mode);
        let logits = self.linear2.forward(x);
        activation::softmax(logits, 1)
    }
}

// ─── Model Config ─────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct NliModelConfig {
    /// Dimension D of the pretrained vectors and encoder output
    pub embedding_dim: usize,

    /// Hidden width H of the ReLU layer
    pub hidden_dim: usize,

    /// Number of target classes C
    pub class_count: usize,

    /// Dropout rate p, in [0, 1)
    pub dropout: f64,
}

impl NliModelConfig {
    /// Build the model, seeding the frozen embedding table from
    /// pretrained vectors. Configuration errors surface here,
    /// before any forward pass can run on a broken setup.
    pub fn init<B: Backend>(
        &self,
        embeddings: &EmbeddingTable,
        device: &B::Device,
    ) -> Result<NliModel<B>> {
        ensure!(self.embedding_dim > 0, "embedding_dim must be positive");
        ensure!(self.hidden_dim > 0, "hidden_dim must be positive");
        ensure!(self.class_count > 0, "class_count must be positive");
        ensure!(
            (0.0..1.0).contains(&self.dropout),
            "dropout rate {} outside [0, 1)",
            self.dropout
        );
        ensure!(
            embeddings.dim == self.embedding_dim,
            "pretrained table has dim {} but the model expects {}",
            embeddings.dim,
            self.embedding_dim
        );
        ensure!(
            embeddings.rows > UNKNOWN_ROW,
            "embedding table has {} rows — the reserved padding and unknown rows are missing",
            embeddings.rows
        );

        let embedding = init_frozen_embedding::<B>(embeddings, device);

        let head = ClassifierHead {
            dropout:    ModeDropout::new(self.dropout),
            linear1:    LinearConfig::new(4 * self.embedding_dim, self.hidden_dim).init(device),
            layer_norm: LayerNormConfig::new(self.hidden_dim).init(device),
            linear2:    LinearConfig::new(self.hidden_dim, self.class_count).init(device),
        };

        tracing::info!(
            "Model ready: {} embedding rows, dim={}, hidden={}, classes={}",
            embeddings.rows,
            self.embedding_dim,
            self.hidden_dim,
            self.class_count
        );

        Ok(NliModel {
            embedding,
            head,
            embedding_dim: self.embedding_dim,
        })
    }
}

/// Copy the pretrained matrix verbatim, re-randomize ONLY the
/// unknown-token row, and freeze the whole table.
///
/// The padding row (index 0) deliberately keeps its pretrained
/// values — the source corpus ships it as all zeros and the
/// lookup preserves whatever it is given.
fn init_frozen_embedding<B: Backend>(
    table: &EmbeddingTable,
    device: &B::Device,
) -> Embedding<B> {
    let weight = Tensor::<B, 2>::from_data(
        TensorData::new(table.data.clone(), [table.rows, table.dim]),
        device,
    );

    let unknown = Tensor::random(
        [1, table.dim],
        Distribution::Uniform(-UNKNOWN_INIT_RANGE, UNKNOWN_INIT_RANGE),
        device,
    );
    let weight = weight.slice_assign([UNKNOWN_ROW..UNKNOWN_ROW + 1, 0..table.dim], unknown);

    let mut embedding = EmbeddingConfig::new(table.rows, table.dim).init(device);
    embedding.weight = Param::from_tensor(weight);

    // no_grad marks every parameter of the module as untrainable;
    // the optimizer must respect the flag, the model never
    // re-checks it per call
    embedding.no_grad()
}

// ─── NliModel ─────────────────────────────────────────────────────────────────
/// The full classifier: frozen embedding lookup + classification
/// head. The sentence encoder stays OUTSIDE the module tree —
/// it is an opaque collaborator handed to every forward call, so
/// the frozen/trainable split of this module is exactly the
/// embedding table (frozen) vs the head (trainable).
#[derive(Module, Debug)]
pub struct NliModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub head:      ClassifierHead<B>,

    /// Expected encoder output dimension D
    pub embedding_dim: usize,
}

impl<B: Backend> NliModel<B> {
    /// Full forward pass over a batch of sentence pairs.
    ///
    /// The same `encoder` instance is used for both sentences —
    /// weight sharing between premise and hypothesis is a
    /// required property of the architecture, not an
    /// optimization.
    ///
    /// Returns class probabilities [batch, C]. Input contract
    /// violations and encoder dimension mismatches fail loudly;
    /// nothing is recovered silently.
    pub fn forward<E: SentenceEncoder<B>>(
        &self,
        encoder: &E,
        batch: &SentencePairBatch<B>,
        mode: RunMode,
    ) -> Result<Tensor<B, 2>> {
        let [batch_size, premise_width]  = batch.premise_ids.dims();
        let [hyp_batch, hypothesis_width] = batch.hypothesis_ids.dims();

        ensure!(
            batch_size == hyp_batch,
            "premise batch ({batch_size}) != hypothesis batch ({hyp_batch})"
        );
        check_lengths(&batch.premise_lengths, batch_size, premise_width, "premise")?;
        check_lengths(&batch.hypothesis_lengths, batch_size, hypothesis_width, "hypothesis")?;

        // Chop each side to the batch-local longest sentence
        // before embedding — padding past that is dead weight
        let premise_ids =
            truncate_to_batch_max(batch.premise_ids.clone(), &batch.premise_lengths);
        let hypothesis_ids =
            truncate_to_batch_max(batch.hypothesis_ids.clone(), &batch.hypothesis_lengths);

        let premise_embedded    = self.embedding.forward(premise_ids);
        let hypothesis_embedded = self.embedding.forward(hypothesis_ids);

        let encoded_premise    = encoder.encode(premise_embedded, &batch.premise_lengths);
        let encoded_hypothesis = encoder.encode(hypothesis_embedded, &batch.hypothesis_lengths);

        for (role, encoded) in [
            ("premise", &encoded_premise),
            ("hypothesis", &encoded_hypothesis),
        ] {
            let [encoded_batch, encoded_dim] = encoded.dims();
            ensure!(
                encoded_batch == batch_size,
                "encoder returned {encoded_batch} {role} vectors for a batch of {batch_size}"
            );
            ensure!(
                encoded_dim == self.embedding_dim,
                "encoder returned {encoded_dim}-dimensional {role} vectors, expected {}",
                self.embedding_dim
            );
        }

        let relation = compose_relation(encoded_premise, encoded_hypothesis)?;
        Ok(self.head.forward(relation, mode))
    }
}

/// Validate one side's true lengths against the batch layout.
fn check_lengths(
    lengths: &[usize],
    batch_size: usize,
    width: usize,
    role: &str,
) -> Result<()> {
    ensure!(
        lengths.len() == batch_size,
        "got {} {role} lengths for a batch of {batch_size}",
        lengths.len()
    );
    for (index, &length) in lengths.iter().enumerate() {
        ensure!(
            length >= 1 && length <= width,
            "{role} {index} has true length {length}, outside [1, {width}]"
        );
    }
    Ok(())
}

/// Argmax over the class axis, returned as host-side indices.
pub fn predicted_classes<B: Backend>(probabilities: Tensor<B, 2>) -> Vec<usize> {
    probabilities
        .argmax(1)
        .flatten::<1>(0, 1)
        .into_data()
        .iter::<i64>()
        .map(|i| i as usize)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::PairBatcher;
    use crate::data::dataset::NliSample;
    use std::cell::Cell;

    type TestBackend = burn::backend::NdArray;

    fn device() -> <TestBackend as Backend>::Device {
        Default::default()
    }

    /// Deterministic pretrained table whose values all sit well
    /// outside the [-0.05, 0.05] re-init range, so the unknown
    /// row MUST change after construction.
    fn toy_table(rows: usize, dim: usize) -> EmbeddingTable {
        let data = (0..rows * dim).map(|i| 0.5 + i as f32).collect();
        EmbeddingTable { rows, dim, data }
    }

    fn tensor2(rows: Vec<Vec<f32>>) -> Tensor<TestBackend, 2> {
        let batch = rows.len();
        let dim   = rows[0].len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        Tensor::from_data(TensorData::new(flat, [batch, dim]), &device())
    }

    fn to_vec(t: Tensor<TestBackend, 2>) -> Vec<f32> {
        t.into_data().to_vec().unwrap()
    }

    /// Encoder stub: first call (the premise) returns `first`
    /// tiled over the batch, second call returns `second`.
    /// Records the sequence width it was handed so truncation
    /// can be asserted through the real forward path.
    struct StubEncoder {
        first:      Vec<f32>,
        second:     Vec<f32>,
        calls:      Cell<usize>,
        seen_width: Cell<usize>,
    }

    impl StubEncoder {
        fn new(first: Vec<f32>, second: Vec<f32>) -> Self {
            Self {
                first,
                second,
                calls: Cell::new(0),
                seen_width: Cell::new(0),
            }
        }
    }

    impl SentenceEncoder<TestBackend> for StubEncoder {
        fn encode(
            &self,
            embedded: Tensor<TestBackend, 3>,
            _lengths: &[usize],
        ) -> Tensor<TestBackend, 2> {
            let [batch, seq_len, _] = embedded.dims();
            self.seen_width.set(seq_len);

            // Odd/even parity, not a one-shot counter: every forward
            // pass makes one premise call then one hypothesis call,
            // so repeated passes must keep yielding the same (u, v)
            let row = if self.calls.get() % 2 == 0 { &self.first } else { &self.second };
            self.calls.set(self.calls.get() + 1);

            let dim = row.len();
            let flat: Vec<f32> = row.iter().copied().cycle().take(batch * dim).collect();
            Tensor::from_data(TensorData::new(flat, [batch, dim]), &embedded.device())
        }
    }

    /// Batch of 2 with uneven lengths: premises [3, 2] and
    /// hypotheses [2, 4], padded to width 10.
    fn toy_batch() -> SentencePairBatch<TestBackend> {
        let samples = vec![
            NliSample {
                premise_ids:    vec![2, 3, 4],
                hypothesis_ids: vec![5, 6],
                label:          Some(0),
            },
            NliSample {
                premise_ids:    vec![4, 2],
                hypothesis_ids: vec![3, 4, 5, 6],
                label:          Some(1),
            },
        ];
        PairBatcher::new(device(), 8, 10).batch(&samples).unwrap()
    }

    fn toy_model(dropout: f64) -> NliModel<TestBackend> {
        NliModelConfig::new(4, 6, 3, dropout)
            .init(&toy_table(8, 4), &device())
            .unwrap()
    }

    // ── Embedding initialization ─────────────────────────────────────────────

    #[test]
    fn test_unknown_row_reinitialized_within_bounds() {
        let table  = toy_table(5, 4);
        let model: NliModel<TestBackend> = NliModelConfig::new(4, 6, 3, 0.0)
            .init(&table, &device())
            .unwrap();

        let weight: Vec<f32> = model.embedding.weight.val().into_data().to_vec().unwrap();
        let unknown = &weight[4..8];

        for (i, &value) in unknown.iter().enumerate() {
            assert!(
                value.abs() <= 0.05 + 1e-6,
                "unknown row entry {i} = {value} outside [-0.05, 0.05]"
            );
            // Source values start at 0.5, so a surviving pretrained
            // entry would be caught here
            assert_ne!(value, table.data[4 + i]);
        }
    }

    #[test]
    fn test_all_other_rows_copied_bit_for_bit() {
        let table  = toy_table(5, 4);
        let model: NliModel<TestBackend> = NliModelConfig::new(4, 6, 3, 0.0)
            .init(&table, &device())
            .unwrap();

        let weight: Vec<f32> = model.embedding.weight.val().into_data().to_vec().unwrap();
        for row in 0..5 {
            if row == 1 {
                continue;
            }
            assert_eq!(
                &weight[row * 4..(row + 1) * 4],
                &table.data[row * 4..(row + 1) * 4],
                "row {row} was not copied verbatim"
            );
        }
    }

    // ── Config validation ────────────────────────────────────────────────────

    #[test]
    fn test_rejects_bad_configuration() {
        let table  = toy_table(5, 4);
        let device = device();

        // dropout outside [0, 1)
        assert!(NliModelConfig::new(4, 6, 3, 1.0)
            .init::<TestBackend>(&table, &device)
            .is_err());
        // dim mismatch against the pretrained table
        assert!(NliModelConfig::new(8, 6, 3, 0.1)
            .init::<TestBackend>(&table, &device)
            .is_err());
        // degenerate head sizes
        assert!(NliModelConfig::new(4, 0, 3, 0.1)
            .init::<TestBackend>(&table, &device)
            .is_err());
        assert!(NliModelConfig::new(4, 6, 0, 0.1)
            .init::<TestBackend>(&table, &device)
            .is_err());
    }

    // ── Relation composer ────────────────────────────────────────────────────

    #[test]
    fn test_compose_relation_hand_checked() {
        let u = tensor2(vec![vec![1.0, 0.0, 1.0, 0.0]]);
        let v = tensor2(vec![vec![0.0, 1.0, 0.0, 1.0]]);

        let relation = to_vec(compose_relation(u, v).unwrap());
        assert_eq!(
            relation,
            vec![
                1.0, 0.0, 1.0, 0.0, // u
                0.0, 1.0, 0.0, 1.0, // v
                1.0, 1.0, 1.0, 1.0, // |u − v|
                0.0, 0.0, 0.0, 0.0, // u * v
            ]
        );
    }

    #[test]
    fn test_compose_relation_dimension_is_4d() {
        for dim in [1usize, 3, 7] {
            let u = Tensor::<TestBackend, 2>::ones([2, dim], &device());
            let v = Tensor::<TestBackend, 2>::zeros([2, dim], &device());
            assert_eq!(compose_relation(u, v).unwrap().dims(), [2, 4 * dim]);
        }
    }

    #[test]
    fn test_compose_relation_is_asymmetric_with_symmetric_diff_block() {
        let u = tensor2(vec![vec![0.5, -1.0, 2.0]]);
        let v = tensor2(vec![vec![1.5, 0.25, -2.0]]);

        let uv = to_vec(compose_relation(u.clone(), v.clone()).unwrap());
        let vu = to_vec(compose_relation(v, u).unwrap());

        assert_ne!(uv, vu, "swapping premise and hypothesis must change the relation");
        // The |u − v| block (third quarter) is identical either way
        assert_eq!(uv[6..9], vu[6..9]);
    }

    #[test]
    fn test_compose_relation_preserves_batch_order() {
        let u = tensor2(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let v = tensor2(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);

        let relation = to_vec(compose_relation(u, v).unwrap());
        // Row 0: u=[1,2] v=[0,0] diff=[1,2] prod=[0,0]
        assert_eq!(&relation[..8], &[1.0, 2.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0]);
        // Row 1: u=[3,4] v=[1,1] diff=[2,3] prod=[3,4]
        assert_eq!(&relation[8..], &[3.0, 4.0, 1.0, 1.0, 2.0, 3.0, 3.0, 4.0]);
    }

    #[test]
    fn test_compose_relation_rejects_dim_mismatch() {
        let u = Tensor::<TestBackend, 2>::ones([1, 4], &device());
        let v = Tensor::<TestBackend, 2>::ones([1, 3], &device());
        assert!(compose_relation(u, v).is_err());
    }

    // ── Truncation ───────────────────────────────────────────────────────────

    #[test]
    fn test_truncates_to_batch_local_max_length() {
        let ids = Tensor::<TestBackend, 2, Int>::zeros([2, 10], &device());
        assert_eq!(truncate_to_batch_max(ids, &[3, 5]).dims(), [2, 5]);
    }

    #[test]
    fn test_truncation_seen_by_encoder_through_forward() {
        let model   = toy_model(0.0);
        let encoder = StubEncoder::new(vec![1.0; 4], vec![0.0; 4]);
        let batch   = toy_batch();

        model.forward(&encoder, &batch, RunMode::Inference).unwrap();

        // Premise lengths are [3, 2] and the encoder runs on the
        // premise first, so the recorded width from the LAST call
        // is the hypothesis side: max(2, 4) = 4, not the padded 10
        assert_eq!(encoder.seen_width.get(), 4);
    }

    // ── Head output ──────────────────────────────────────────────────────────

    #[test]
    fn test_probability_rows_are_distributions_in_both_modes() {
        let model    = toy_model(0.5);
        let relation = tensor2(vec![
            vec![0.3; 16],
            vec![-1.2; 16],
        ]);

        for mode in [RunMode::Train, RunMode::Inference] {
            let probs = to_vec(model.head.forward(relation.clone(), mode));
            for row in probs.chunks(3) {
                let sum: f32 = row.iter().sum();
                assert!((sum - 1.0).abs() < 1e-5, "row sums to {sum} in {mode:?}");
                assert!(row.iter().all(|&p| p >= 0.0));
            }
        }
    }

    #[test]
    fn test_inference_is_deterministic() {
        let model   = toy_model(0.5);
        let encoder = StubEncoder::new(vec![0.2, -0.4, 1.0, 0.0], vec![0.5; 4]);
        let batch   = toy_batch();

        let first = to_vec(
            model.forward(&encoder, &batch, RunMode::Inference).unwrap(),
        );
        let second = to_vec(
            model.forward(&encoder, &batch, RunMode::Inference).unwrap(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_train_with_zero_dropout_matches_inference() {
        let model   = toy_model(0.0);
        let encoder = StubEncoder::new(vec![0.2, -0.4, 1.0, 0.0], vec![0.5; 4]);
        let batch   = toy_batch();

        let train = to_vec(model.forward(&encoder, &batch, RunMode::Train).unwrap());
        let infer = to_vec(
            model.forward(&encoder, &batch, RunMode::Inference).unwrap(),
        );
        assert_eq!(train, infer);
    }

    // ── End-to-end scenario ──────────────────────────────────────────────────

    #[test]
    fn test_end_to_end_shapes_and_distributions() {
        // D=4, H=6, C=3, batch of 2, premise lengths [3, 2],
        // hypothesis lengths [2, 4], stubbed encoder returning
        // u=[1,0,1,0] and v=[0,1,0,1]
        let model   = toy_model(0.0);
        let encoder = StubEncoder::new(vec![1.0, 0.0, 1.0, 0.0], vec![0.0, 1.0, 0.0, 1.0]);
        let batch   = toy_batch();

        let probs = model.forward(&encoder, &batch, RunMode::Inference).unwrap();
        assert_eq!(probs.dims(), [2, 3]);

        let values = to_vec(probs);
        for row in values.chunks(3) {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert!(row.iter().all(|&p| p >= 0.0));
        }
    }

    // ── Input contract violations ────────────────────────────────────────────

    #[test]
    fn test_rejects_length_count_mismatch() {
        let model   = toy_model(0.0);
        let encoder = StubEncoder::new(vec![1.0; 4], vec![1.0; 4]);
        let mut batch = toy_batch();
        batch.premise_lengths = vec![3];

        assert!(model.forward(&encoder, &batch, RunMode::Inference).is_err());
    }

    #[test]
    fn test_rejects_length_exceeding_padded_width() {
        let model   = toy_model(0.0);
        let encoder = StubEncoder::new(vec![1.0; 4], vec![1.0; 4]);
        let mut batch = toy_batch();
        batch.hypothesis_lengths = vec![2, 11];

        assert!(model.forward(&encoder, &batch, RunMode::Inference).is_err());
    }

    #[test]
    fn test_rejects_encoder_with_wrong_output_dim() {
        let model   = toy_model(0.0);
        // 5-dimensional vectors against a model expecting D=4
        let encoder = StubEncoder::new(vec![1.0; 5], vec![1.0; 5]);
        let batch   = toy_batch();

        let err = model
            .forward(&encoder, &batch, RunMode::Inference)
            .unwrap_err();
        assert!(err.to_string().contains("expected 4"));
    }
}
