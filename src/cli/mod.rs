// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `classify` — decides the relation of one sentence pair
//   2. `evaluate` — scores the classifier on a labeled corpus
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ClassifyArgs, Commands, EvaluateArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "nli-classifier",
    version = "0.1.0",
    about = "Classify the semantic relation between a premise and a hypothesis."
)]
pub struct Cli {
    /// The subcommand to run (classify or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The match moves the args out of `self`, so the handlers are
    /// associated functions rather than methods.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Classify(args) => Self::run_classify(args),
            Commands::Evaluate(args) => Self::run_evaluate(args),
        }
    }

    /// Handles the `classify` subcommand.
    fn run_classify(args: ClassifyArgs) -> Result<()> {
        use crate::application::classify_use_case::ClassifyUseCase;
        use crate::domain::label::Label;
        use crate::domain::sentence_pair::SentencePair;
        use crate::domain::traits::RelationClassifier;

        tracing::info!("Classifying one pair using '{}'", args.embeddings);

        let use_case =
            ClassifyUseCase::new(&args.embeddings, args.hidden_dim, args.max_seq_len)?;
        let pair = SentencePair::new(&args.premise, &args.hypothesis);
        let prediction = use_case.classify(&pair)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        } else {
            println!(
                "\nRelation: {} (confidence {:.1}%)",
                prediction.label.as_str(),
                prediction.confidence() * 100.0,
            );
            for (label, p) in Label::all().iter().zip(&prediction.probabilities) {
                println!("  {:<13} {:.4}", label.as_str(), p);
            }
        }
        Ok(())
    }

    /// Handles the `evaluate` subcommand.
    /// Converts CLI args into an EvalConfig and hands off to Layer 2.
    fn run_evaluate(args: EvaluateArgs) -> Result<()> {
        use crate::application::evaluate_use_case::EvaluateUseCase;

        tracing::info!("Starting evaluation on '{}'", args.data);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = EvaluateUseCase::new(args.into());
        use_case.execute()?;

        println!("Evaluation complete. Report written.");
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_classify_and_moves_args_out() {
        let cli = Cli::parse_from([
            "nli-classifier",
            "classify",
            "--premise",
            "A dog runs.",
            "--hypothesis",
            "An animal moves.",
        ]);

        // Consuming the parsed struct the same way run() does —
        // the args move out of the enum and stand alone
        let Commands::Classify(args) = cli.command else {
            panic!("expected the classify subcommand");
        };
        assert_eq!(args.premise, "A dog runs.");
        assert_eq!(args.hypothesis, "An animal moves.");
    }

    #[test]
    fn test_parses_evaluate_into_config() {
        let cli = Cli::parse_from([
            "nli-classifier",
            "evaluate",
            "--data",
            "pairs.tsv",
            "--batch-size",
            "16",
        ]);

        let Commands::Evaluate(args) = cli.command else {
            panic!("expected the evaluate subcommand");
        };
        let config: crate::application::evaluate_use_case::EvalConfig = args.into();
        assert_eq!(config.data_path, "pairs.tsv");
        assert_eq!(config.batch_size, 16);
    }
}
