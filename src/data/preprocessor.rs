// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns a raw sentence into the token stream the vocabulary
// understands.
//
// Why such a simple tokenizer?
//   The pretrained vectors we load (GloVe-style text files)
//   were themselves built from lower-cased, punctuation-split
//   tokens. Anything fancier (BPE, WordPiece) would produce
//   tokens the embedding table has never seen, pushing almost
//   every word onto the <unk> row.
//
// Tokenization rules (applied per character):
//   1. Letters and digits extend the current word
//   2. Apostrophes stay inside words ("don't" → "don't")
//   3. Whitespace ends the current word
//   4. Any other character ends the word AND becomes its own
//      single-character token ("end." → "end", ".")
//   5. Everything is lower-cased
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Split a raw sentence into lower-case tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens  = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() || c == '\'' {
                // Lower-casing can expand to multiple chars (e.g. 'İ')
                for lower in c.to_lowercase() {
                    current.push(lower);
                }
            } else if c.is_whitespace() {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            } else {
                // Punctuation becomes its own token
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
        }

        if !current.is_empty() {
            tokens.push(current);
        }

        tokens
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
