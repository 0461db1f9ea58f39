// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   embedding_store.rs — Pretrained vector loading
//                        Reads GloVe-format text files into the
//                        vocabulary and the raw [rows, dim]
//                        weight matrix the model copies its
//                        frozen table from. Guarantees the two
//                        reserved rows (<pad>, <unk>) exist and
//                        that every vector has the same width.
//
//   metrics.rs         — Evaluation reporting
//                        Confusion matrix with accuracy and
//                        per-class precision/recall, written as
//                        a CSV report plus a JSON summary for
//                        later analysis and plotting.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. a binary embedding cache instead of text files)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Pretrained embedding loading and the raw weight matrix type
pub mod embedding_store;

/// Confusion matrix, accuracy, and evaluation report files
pub mod metrics;
