// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `classify` and `evaluate`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::evaluate_use_case::EvalConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the relation between one premise and one hypothesis
    Classify(ClassifyArgs),

    /// Evaluate the classifier over a labeled .tsv corpus file
    Evaluate(EvaluateArgs),
}

/// All arguments for the `classify` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The premise sentence (taken as given)
    #[arg(long)]
    pub premise: String,

    /// The hypothesis sentence (judged against the premise)
    #[arg(long)]
    pub hypothesis: String,

    /// GloVe-format pretrained embedding file
    #[arg(long, default_value = "data/glove.6B.300d.txt")]
    pub embeddings: String,

    /// Hidden width of the ReLU layer in the classification head
    #[arg(long, default_value_t = 300)]
    pub hidden_dim: usize,

    /// Maximum number of tokens kept per sentence
    #[arg(long, default_value_t = 64)]
    pub max_seq_len: usize,

    /// Print the prediction as JSON instead of plain text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Labeled corpus file: label <TAB> premise <TAB> hypothesis
    #[arg(long, default_value = "data/snli_dev.tsv")]
    pub data: String,

    /// GloVe-format pretrained embedding file
    #[arg(long, default_value = "data/glove.6B.300d.txt")]
    pub embeddings: String,

    /// Directory the CSV report and JSON summary are written to
    #[arg(long, default_value = "reports")]
    pub report_dir: String,

    /// Number of pairs processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Hidden width of the ReLU layer in the classification head
    #[arg(long, default_value_t = 300)]
    pub hidden_dim: usize,

    /// Maximum number of tokens kept per sentence
    #[arg(long, default_value_t = 64)]
    pub max_seq_len: usize,

    /// Dropout rate the model is constructed with — randomly
    /// zeroes activations during training; inert while evaluating
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,
}

/// Convert CLI EvaluateArgs into the application-layer EvalConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<EvaluateArgs> for EvalConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvalConfig {
            data_path:       a.data,
            embeddings_path: a.embeddings,
            report_dir:      a.report_dir,
            batch_size:      a.batch_size,
            hidden_dim:      a.hidden_dim,
            max_seq_len:     a.max_seq_len,
            dropout:         a.dropout,
        }
    }
}
