// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw corpus files
// all the way to tensor batches ready for the model.
//
// The pipeline flows in this order:
//
//   SNLI-style .tsv file
//       │
//       ▼
//   TsvPairLoader     → reads lines, parses label + sentences
//       │
//       ▼
//   Preprocessor      → lowercases and splits into tokens
//       │
//       ▼
//   Vocabulary        → maps tokens to integer ids
//       │                (<pad> = 0, <unk> = 1)
//       ▼
//   NliDataset        → implements Burn's Dataset trait
//       │
//       ▼
//   PairBatcher       → pads both sides, records true lengths,
//                       validates the id/length contracts,
//                       stacks ids into tensor batches
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets)
//            Rust Book §13 (Iterators and Closures)

/// Reads labeled sentence pairs from tab-separated files
pub mod loader;

/// Lowercasing whitespace/punctuation tokenizer
pub mod preprocessor;

/// Token ↔ id mapping with reserved padding and unknown slots
pub mod vocab;

/// Implements Burn's Dataset trait for tokenized pair samples
pub mod dataset;

/// Pads, validates, and stacks samples into tensor batches
pub mod batcher;
