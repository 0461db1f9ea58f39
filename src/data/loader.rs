// ============================================================
// Layer 4 — Pair Loader
// ============================================================
// Reads labeled sentence pairs from a tab-separated file.
//
// Expected line format (one example per line):
//
//   label <TAB> premise <TAB> hypothesis
//
// e.g.
//   entailment	A dog runs outside.	An animal is outdoors.
//
// Two SNLI conventions are honoured:
//   - Lines whose label is "-" carry no annotator consensus
//     and are silently dropped (the corpus ships them anyway)
//   - Malformed lines are skipped with a warning rather than
//     failing the whole load — corpus files in the wild have
//     stray headers and blank lines
//
// Reference: Bowman et al. (2015) SNLI corpus paper
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::fs;

use crate::domain::label::Label;
use crate::domain::sentence_pair::LabeledPair;
use crate::domain::traits::PairSource;

/// Loads labeled pairs from one .tsv file.
/// Implements the PairSource trait from Layer 3.
pub struct TsvPairLoader {
    /// Path to the tab-separated corpus file
    path: String,
}

impl TsvPairLoader {
    /// Create a new loader pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PairSource for TsvPairLoader {
    fn load_all(&self) -> Result<Vec<LabeledPair>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read pair file '{}'", self.path))?;

        let mut pairs   = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line) {
                // Parsed, labeled example
                Ok(Some(pair)) => pairs.push(pair),
                // Valid line without annotator consensus ("-" label)
                Ok(None) => skipped += 1,
                // Log a warning but continue — don't fail on one bad line
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        "Skipping line {} of '{}': {}",
                        line_no + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        tracing::info!(
            "Loaded {} labeled pairs from '{}' ({} lines skipped)",
            pairs.len(),
            self.path,
            skipped
        );
        Ok(pairs)
    }
}

/// Parse one corpus line.
///
/// Returns:
///   Ok(Some(pair)) — a usable labeled example
///   Ok(None)       — a consensus-less example (label "-"), to be dropped
///   Err(_)         — a malformed line
pub fn parse_line(line: &str) -> Result<Option<LabeledPair>> {
    let mut fields = line.splitn(3, '\t');

    let label      = fields.next().unwrap_or("").trim();
    let premise    = fields.next().map(str::trim);
    let hypothesis = fields.next().map(str::trim);

    let (Some(premise), Some(hypothesis)) = (premise, hypothesis) else {
        bail!("expected 3 tab-separated fields");
    };

    if premise.is_empty() || hypothesis.is_empty() {
        bail!("empty premise or hypothesis");
    }

    // "-" marks examples where the five annotators did not agree
    if label == "-" {
        return Ok(None);
    }

    let label: Label = label.parse()?;
    Ok(Some(LabeledPair::new(premise, hypothesis, label)))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_labeled_line() {
        let pair = parse_line("entailment\tA dog runs.\tAn animal moves.")
            .unwrap()
            .unwrap();
        assert_eq!(pair.label, Label::Entailment);
        assert_eq!(pair.premise, "A dog runs.");
        assert_eq!(pair.hypothesis, "An animal moves.");
    }

    #[test]
    fn test_drops_consensusless_line() {
        let parsed = parse_line("-\tA dog runs.\tAn animal moves.").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert!(parse_line("entailment\tonly one sentence").is_err());
    }

    #[test]
    fn test_rejects_unknown_label() {
        assert!(parse_line("sometimes\tA dog runs.\tAn animal moves.").is_err());
    }

    #[test]
    fn test_rejects_empty_sentence() {
        assert!(parse_line("neutral\t\tAn animal moves.").is_err());
    }
}
