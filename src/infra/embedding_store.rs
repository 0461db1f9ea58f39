// ============================================================
// Layer 6 — Embedding Store
// ============================================================
// Loads pretrained word vectors from GloVe-format text files:
//
//   the 0.418 0.24968 -0.41242 ...
//   of 0.70853 0.57088 -0.4716 ...
//
// One token per line, followed by its vector, space-separated.
//
// The store produces two things that MUST stay in sync:
//   - a Vocabulary whose ids index the matrix rows
//   - the raw [rows, dim] matrix itself
//
// Rows 0 and 1 are the reserved <pad> and <unk> slots. The
// file never contains them, so the store writes zero vectors
// for both; the model later re-randomizes exactly row 1 and
// leaves row 0 as supplied.
//
// Inconsistent vector widths are a configuration error and
// fail the whole load — padding or truncating a vector would
// silently corrupt every lookup of that word.
//
// Reference: Pennington et al. (2014) GloVe
//            Rust Book §9 (Error Handling)

use anyhow::{bail, ensure, Context, Result};
use std::fs;

use crate::data::vocab::Vocabulary;

/// The raw pretrained weight matrix, row-major.
/// Row i is the vector for vocabulary id i.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    /// Number of rows (= vocabulary size, reserved rows included)
    pub rows: usize,

    /// Vector dimension D
    pub dim: usize,

    /// rows * dim values, row-major
    pub data: Vec<f32>,
}

impl EmbeddingTable {
    /// Borrow one row as a slice
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.dim..(index + 1) * self.dim]
    }
}

/// Loads a pretrained embedding file and the vocabulary it spans.
pub struct EmbeddingStore {
    /// Path to the GloVe-format text file
    path: String,
}

impl EmbeddingStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file and build (vocabulary, table).
    pub fn load(&self) -> Result<(Vocabulary, EmbeddingTable)> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read embedding file '{}'", self.path))?;

        let (vocab, table) = parse_embeddings(&contents)
            .with_context(|| format!("Malformed embedding file '{}'", self.path))?;

        tracing::info!(
            "Loaded {} pretrained vectors (dim={}) from '{}'",
            table.rows,
            table.dim,
            self.path
        );
        Ok((vocab, table))
    }
}

/// Parse GloVe-format text into a vocabulary and its matrix.
/// Split out from load() so tests can run on in-memory strings.
pub fn parse_embeddings(contents: &str) -> Result<(Vocabulary, EmbeddingTable)> {
    let mut vocab = Vocabulary::new();
    let mut dim: Option<usize> = None;
    let mut data: Vec<f32> = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (token, vector) = parse_vector_line(line)
            .with_context(|| format!("line {}", line_no + 1))?;

        // The first data line fixes the dimension; every later
        // line must agree exactly
        let expected = *dim.get_or_insert(vector.len());
        ensure!(
            vector.len() == expected,
            "line {}: vector has {} entries, expected {}",
            line_no + 1,
            vector.len(),
            expected
        );

        if vocab.contains(&token) {
            tracing::warn!("Duplicate token '{}' at line {} — keeping the first", token, line_no + 1);
            continue;
        }

        // Zero rows for <pad> and <unk> go in once the dimension
        // is known, before the first real word
        if data.is_empty() {
            data.extend(std::iter::repeat(0.0).take(2 * expected));
        }

        vocab.add_token(&token);
        data.extend(vector);
    }

    let Some(dim) = dim else {
        bail!("embedding file contains no vectors");
    };

    let rows = vocab.len();
    debug_assert_eq!(data.len(), rows * dim);

    Ok((vocab, EmbeddingTable { rows, dim, data }))
}

/// Parse "token v1 v2 ... vD" into its parts.
fn parse_vector_line(line: &str) -> Result<(String, Vec<f32>)> {
    let mut parts = line.split_whitespace();

    let Some(token) = parts.next() else {
        bail!("empty line");
    };

    let vector = parts
        .map(|p| {
            p.parse::<f32>()
                .with_context(|| format!("'{p}' is not a number"))
        })
        .collect::<Result<Vec<f32>>>()?;

    ensure!(!vector.is_empty(), "token '{token}' has no vector");
    Ok((token.to_string(), vector))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::{PAD_ID, UNK_ID};

    const TOY_FILE: &str = "\
the 0.1 0.2 0.3
cat 0.4 0.5 0.6
sat -0.1 -0.2 -0.3
";

    #[test]
    fn test_reserved_rows_are_zero() {
        let (_, table) = parse_embeddings(TOY_FILE).unwrap();
        assert_eq!(table.row(PAD_ID as usize), &[0.0, 0.0, 0.0]);
        assert_eq!(table.row(UNK_ID as usize), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rows_align_with_vocabulary_ids() {
        let (vocab, table) = parse_embeddings(TOY_FILE).unwrap();
        assert_eq!(table.rows, 5);
        assert_eq!(table.dim, 3);

        let cat = vocab.id_of("cat") as usize;
        assert_eq!(table.row(cat), &[0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_rejects_inconsistent_dimensions() {
        let bad = "the 0.1 0.2 0.3\ncat 0.4 0.5\n";
        assert!(parse_embeddings(bad).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_entry() {
        assert!(parse_embeddings("the 0.1 oops 0.3\n").is_err());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(parse_embeddings("\n\n").is_err());
    }

    #[test]
    fn test_duplicate_tokens_keep_first_vector() {
        let dup = "the 0.1 0.2\nthe 0.9 0.9\ncat 0.3 0.4\n";
        let (vocab, table) = parse_embeddings(dup).unwrap();
        assert_eq!(table.rows, 4);
        assert_eq!(table.row(vocab.id_of("the") as usize), &[0.1, 0.2]);
    }
}
