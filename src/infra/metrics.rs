// ============================================================
// Layer 6 — Evaluation Metrics
// ============================================================
// Aggregates gold-vs-predicted label pairs into a confusion
// matrix and writes two report files:
//
//   report.csv       — one row per class:
//                      label,support,precision,recall
//   summary.json     — overall counts and accuracy, machine-readable
//   eval_config.json — the configuration the run used, so the
//                      numbers can be reproduced later
//
// Example CSV output:
//   label,support,precision,recall
//   entailment,3329,0.712000,0.744000
//   neutral,3235,0.655000,0.601000
//   contradiction,3278,0.709000,0.731000
//
// How to read the numbers:
//   - precision: of everything predicted as class X, how much
//     really was X
//   - recall: of everything that really was X, how much we
//     caught
//   - a class with high precision and low recall is one the
//     model is too shy about predicting
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::application::evaluate_use_case::EvalConfig;
use crate::domain::label::Label;

// ─── ConfusionMatrix ──────────────────────────────────────────────────────────
/// counts[gold][predicted], square over the class count.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    class_count: usize,
    counts: Vec<usize>,
}

impl ConfusionMatrix {
    pub fn new(class_count: usize) -> Self {
        Self {
            class_count,
            counts: vec![0; class_count * class_count],
        }
    }

    /// Record one example. Out-of-range indices are a caller bug
    /// and rejected rather than clamped.
    pub fn record(&mut self, gold: usize, predicted: usize) -> Result<()> {
        ensure!(
            gold < self.class_count && predicted < self.class_count,
            "class index ({gold}, {predicted}) outside [0, {})",
            self.class_count
        );
        self.counts[gold * self.class_count + predicted] += 1;
        Ok(())
    }

    pub fn count(&self, gold: usize, predicted: usize) -> usize {
        self.counts[gold * self.class_count + predicted]
    }

    /// Total recorded examples
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Examples on the diagonal (gold == predicted)
    pub fn correct(&self) -> usize {
        (0..self.class_count).map(|c| self.count(c, c)).sum()
    }

    /// Overall accuracy in [0, 1]; 0 for an empty matrix
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Gold examples of one class
    pub fn support(&self, class: usize) -> usize {
        (0..self.class_count).map(|p| self.count(class, p)).sum()
    }

    /// Of everything predicted as `class`, the fraction that was right
    pub fn precision(&self, class: usize) -> f64 {
        let predicted: usize = (0..self.class_count).map(|g| self.count(g, class)).sum();
        if predicted == 0 {
            return 0.0;
        }
        self.count(class, class) as f64 / predicted as f64
    }

    /// Of everything that really was `class`, the fraction we caught
    pub fn recall(&self, class: usize) -> f64 {
        let support = self.support(class);
        if support == 0 {
            return 0.0;
        }
        self.count(class, class) as f64 / support as f64
    }
}

// ─── EvalSummary ──────────────────────────────────────────────────────────────
/// The machine-readable half of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total:    usize,
    pub correct:  usize,
    pub accuracy: f64,
}

// ─── MetricsWriter ────────────────────────────────────────────────────────────
/// Writes the per-class CSV report and the JSON summary into a
/// directory, creating it if needed.
pub struct MetricsWriter {
    dir: PathBuf,
}

impl MetricsWriter {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: PathBuf::from(dir.into()),
        }
    }

    /// Write both report files; returns the CSV path.
    pub fn write(&self, matrix: &ConfusionMatrix) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let csv_path = self.dir.join("report.csv");
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "label,support,precision,recall")?;
        for label in Label::all() {
            let class = label.index();
            writeln!(
                f,
                "{},{},{:.6},{:.6}",
                label.as_str(),
                matrix.support(class),
                matrix.precision(class),
                matrix.recall(class),
            )?;
        }

        let summary = EvalSummary {
            total:    matrix.total(),
            correct:  matrix.correct(),
            accuracy: matrix.accuracy(),
        };
        let summary_path = self.dir.join("summary.json");
        fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;

        tracing::debug!(
            "Wrote evaluation report to '{}'",
            self.dir.display()
        );
        Ok(csv_path)
    }

    /// Persist the configuration of the run next to its numbers.
    pub fn write_config(&self, config: &EvalConfig) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join("eval_config.json");
        fs::write(&path, serde_json::to_string_pretty(config)?)?;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn toy_matrix() -> ConfusionMatrix {
        let mut m = ConfusionMatrix::new(3);
        // gold 0: 2 right, 1 predicted as class 1
        m.record(0, 0).unwrap();
        m.record(0, 0).unwrap();
        m.record(0, 1).unwrap();
        // gold 1: 1 right
        m.record(1, 1).unwrap();
        // gold 2: 1 right, 1 predicted as class 0
        m.record(2, 2).unwrap();
        m.record(2, 0).unwrap();
        m
    }

    #[test]
    fn test_accuracy() {
        let m = toy_matrix();
        assert_eq!(m.total(), 6);
        assert_eq!(m.correct(), 4);
        assert!((m.accuracy() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_precision_and_recall() {
        let m = toy_matrix();
        // class 0: predicted 3 times (2 right + 1 from gold 2)
        assert!((m.precision(0) - 2.0 / 3.0).abs() < 1e-12);
        // class 0: 3 gold examples, 2 caught
        assert!((m.recall(0) - 2.0 / 3.0).abs() < 1e-12);
        // class 1: predicted twice, 1 right
        assert!((m.precision(1) - 0.5).abs() < 1e-12);
        assert_eq!(m.recall(1), 1.0);
    }

    #[test]
    fn test_empty_matrix_has_zero_accuracy() {
        let m = ConfusionMatrix::new(3);
        assert_eq!(m.accuracy(), 0.0);
        assert_eq!(m.precision(0), 0.0);
        assert_eq!(m.recall(0), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_class() {
        let mut m = ConfusionMatrix::new(3);
        assert!(m.record(3, 0).is_err());
        assert!(m.record(0, 7).is_err());
    }

    #[test]
    fn test_write_config_round_trips_through_the_report_dir() {
        let dir = std::env::temp_dir().join(format!(
            "nli-metrics-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        let writer = MetricsWriter::new(dir.to_string_lossy().to_string());

        let config = EvalConfig {
            batch_size: 16,
            ..EvalConfig::default()
        };
        let path = writer.write_config(&config).unwrap();
        assert_eq!(path.file_name().unwrap(), "eval_config.json");

        let restored: EvalConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.batch_size, 16);
        assert_eq!(restored.data_path, config.data_path);

        fs::remove_dir_all(&dir).unwrap();
    }
}
