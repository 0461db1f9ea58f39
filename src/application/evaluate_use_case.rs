// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Orchestrates the full evaluation pipeline in order:
//
//   Step 1: Load pretrained vectors + vocabulary (Layer 6)
//   Step 2: Build the model over the frozen table (Layer 5)
//   Step 3: Load labeled pairs from the .tsv file (Layer 4)
//   Step 4: Tokenize into a dataset                (Layer 4)
//   Step 5: Batch, forward in inference mode, and
//           accumulate the confusion matrix        (Layers 4-6)
//   Step 6: Write the CSV report + JSON summary    (Layer 6)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{ensure, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::PairBatcher,
    dataset::{NliDataset, NliSample},
    loader::TsvPairLoader,
    preprocessor::Preprocessor,
};
use crate::domain::label::CLASS_COUNT;
use crate::domain::traits::PairSource;
use crate::infra::embedding_store::EmbeddingStore;
use crate::infra::metrics::{ConfusionMatrix, EvalSummary, MetricsWriter};
use crate::ml::encoder::MeanPoolEncoder;
use crate::ml::model::{predicted_classes, NliModel, NliModelConfig, RunMode};

type EvalBackend = burn::backend::NdArray;

// ─── Evaluation Configuration ─────────────────────────────────────────────────
// Everything an evaluation run needs. Serialisable so a run can
// be reproduced from the report directory later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub data_path:       String,
    pub embeddings_path: String,
    pub report_dir:      String,
    pub batch_size:      usize,
    pub hidden_dim:      usize,
    pub max_seq_len:     usize,
    pub dropout:         f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            data_path:       "data/snli_dev.tsv".to_string(),
            embeddings_path: "data/glove.6B.300d.txt".to_string(),
            report_dir:      "reports".to_string(),
            batch_size:      32,
            hidden_dim:      300,
            max_seq_len:     64,
            dropout:         0.1,
        }
    }
}

// ─── EvaluateUseCase ──────────────────────────────────────────────────────────
// Owns the config and runs the full evaluation pipeline.
pub struct EvaluateUseCase {
    config: EvalConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Execute the evaluation end to end, returning the summary.
    pub fn execute(&self) -> Result<EvalSummary> {
        let cfg = &self.config;

        // ── Step 1: Pretrained vectors + vocabulary ───────────────────────────
        let (vocab, table) = EmbeddingStore::new(&cfg.embeddings_path).load()?;

        // ── Step 2: Model over the frozen table ───────────────────────────────
        let device = Default::default();
        let model: NliModel<EvalBackend> =
            NliModelConfig::new(table.dim, cfg.hidden_dim, CLASS_COUNT, cfg.dropout)
                .init(&table, &device)?;
        let encoder = MeanPoolEncoder::new();

        // ── Step 3: Labeled pairs ─────────────────────────────────────────────
        let pairs = TsvPairLoader::new(&cfg.data_path).load_all()?;
        ensure!(
            !pairs.is_empty(),
            "no usable pairs in '{}'",
            cfg.data_path
        );

        // ── Step 4: Tokenized dataset ─────────────────────────────────────────
        let dataset =
            NliDataset::from_pairs(&pairs, &vocab, &Preprocessor::new(), cfg.max_seq_len);
        tracing::info!("Evaluating {} examples", dataset.len());

        // ── Step 5: Batched inference ─────────────────────────────────────────
        let batcher = PairBatcher::new(device, vocab.len(), cfg.max_seq_len);
        let mut matrix = ConfusionMatrix::new(CLASS_COUNT);

        for start in (0..dataset.len()).step_by(cfg.batch_size.max(1)) {
            let end = (start + cfg.batch_size.max(1)).min(dataset.len());
            let items: Vec<NliSample> = (start..end).filter_map(|i| dataset.get(i)).collect();

            let batch = batcher.batch(&items)?;
            let probs = model.forward(&encoder, &batch, RunMode::Inference)?;

            for (predicted, gold) in predicted_classes(probs).iter().zip(&batch.labels) {
                if let Some(gold) = gold {
                    matrix.record(*gold, *predicted)?;
                }
            }
        }

        // ── Step 6: Reports ───────────────────────────────────────────────────
        let writer = MetricsWriter::new(&cfg.report_dir);
        let csv_path = writer.write(&matrix)?;
        writer.write_config(cfg)?;
        tracing::info!("Report written to '{}'", csv_path.display());

        println!(
            "Evaluated {} pairs | accuracy={:.1}%",
            matrix.total(),
            matrix.accuracy() * 100.0,
        );

        Ok(EvalSummary {
            total:    matrix.total(),
            correct:  matrix.correct(),
            accuracy: matrix.accuracy(),
        })
    }
}
