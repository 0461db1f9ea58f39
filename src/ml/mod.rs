// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the batcher that feeds it.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without a tensor backend
//   - The model architecture is clearly separated from
//     data loading and application logic
//
// What's in this layer:
//
//   model.rs   — The sentence-pair classifier
//                • Frozen pretrained embedding table with a
//                  re-randomized unknown-token row
//                • Relation composition: concat(u, v, |u−v|, u*v)
//                • Two-layer head with dropout, layer norm,
//                  ReLU, and a softmax output
//                • Explicit train/inference mode switch
//
//   encoder.rs — The sentence-encoder contract
//                One capability: padded embedded sequence +
//                true lengths → one fixed-size vector per
//                sentence. Ships a mean-pooling reference
//                implementation; any encoder satisfying the
//                trait can be substituted.
//
// Reference: Burn Book §3 (Building Blocks)
//            Conneau et al. (2017) InferSent
//            Bowman et al. (2015) SNLI

/// The embedding + composition + classification model
pub mod model;

/// Sentence-encoder trait and mean-pooling reference encoder
pub mod encoder;
