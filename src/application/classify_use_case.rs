// ============================================================
// Layer 2 — Classify Use Case
// ============================================================
// Classifies one premise/hypothesis pair end to end:
//
//   Step 1: Load pretrained vectors + vocabulary (Layer 6)
//   Step 2: Build the model over the frozen table (Layer 5)
//   Step 3: Tokenize and encode both sentences    (Layer 4)
//   Step 4: Batch of one, forward in inference mode
//   Step 5: Return label + probability distribution
//
// The classification head starts from freshly initialized
// parameters — restoring trained weights belongs to the
// surrounding training tooling, so out of the box this use
// case demonstrates the pipeline rather than a tuned model.
//
// Reference: Rust Book §10 (Traits)

use anyhow::{ensure, Context, Result};

use crate::data::batcher::PairBatcher;
use crate::data::dataset::NliSample;
use crate::data::preprocessor::Preprocessor;
use crate::data::vocab::Vocabulary;
use crate::domain::label::{Label, CLASS_COUNT};
use crate::domain::sentence_pair::SentencePair;
use crate::domain::traits::{Prediction, RelationClassifier};
use crate::infra::embedding_store::EmbeddingStore;
use crate::ml::encoder::MeanPoolEncoder;
use crate::ml::model::{predicted_classes, NliModel, NliModelConfig, RunMode};

type InferBackend = burn::backend::NdArray;

pub struct ClassifyUseCase {
    vocab:        Vocabulary,
    model:        NliModel<InferBackend>,
    encoder:      MeanPoolEncoder,
    preprocessor: Preprocessor,
    batcher:      PairBatcher<InferBackend>,
    max_seq_len:  usize,
}

impl ClassifyUseCase {
    /// Load the embeddings and assemble the pipeline.
    pub fn new(embeddings_path: &str, hidden_dim: usize, max_seq_len: usize) -> Result<Self> {
        let (vocab, table) = EmbeddingStore::new(embeddings_path).load()?;
        let device = Default::default();

        // Dropout is inert at inference either way; 0.0 keeps the
        // single-pair path trivially deterministic
        let model = NliModelConfig::new(table.dim, hidden_dim, CLASS_COUNT, 0.0)
            .init(&table, &device)?;

        let batcher = PairBatcher::new(device, vocab.len(), max_seq_len);

        Ok(Self {
            vocab,
            model,
            encoder: MeanPoolEncoder::new(),
            preprocessor: Preprocessor::new(),
            batcher,
            max_seq_len,
        })
    }

    /// Tokenize and encode one sentence, applying the length cap.
    fn encode_sentence(&self, text: &str, role: &str) -> Result<Vec<u32>> {
        let mut ids = self.vocab.encode(&self.preprocessor.tokenize(text));
        ensure!(!ids.is_empty(), "{role} contains no tokens");
        ids.truncate(self.max_seq_len);
        Ok(ids)
    }
}

impl RelationClassifier for ClassifyUseCase {
    fn classify(&self, pair: &SentencePair) -> Result<Prediction> {
        let sample = NliSample {
            premise_ids:    self.encode_sentence(&pair.premise, "premise")?,
            hypothesis_ids: self.encode_sentence(&pair.hypothesis, "hypothesis")?,
            label:          None,
        };

        let batch = self.batcher.batch(std::slice::from_ref(&sample))?;
        let probs = self
            .model
            .forward(&self.encoder, &batch, RunMode::Inference)?;

        let class = predicted_classes(probs.clone())
            .first()
            .copied()
            .context("model produced no prediction")?;

        let probabilities: Vec<f32> = probs
            .into_data()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("cannot read probabilities: {e:?}"))?;

        tracing::debug!(
            "Classified pair as '{}' with distribution {:?}",
            Label::from_index(class)?.as_str(),
            probabilities
        );

        Ok(Prediction {
            label: Label::from_index(class)?,
            probabilities,
        })
    }
}
