// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Maps tokens to the integer ids the embedding table is
// indexed by, and back.
//
// Two rows are reserved by convention and exist in EVERY
// vocabulary, before any corpus word:
//
//   id 0 — <pad>  fills the unused tail of padded sequences
//   id 1 — <unk>  stands in for out-of-vocabulary tokens
//
// The model relies on this layout: it re-initializes exactly
// row 1 of the embedding table at construction time, so the
// vocabulary and the table MUST agree on what id 1 means.
//
// Reference: Rust Book §8 (HashMaps)

use std::collections::HashMap;

/// Reserved id for the padding token
pub const PAD_ID: u32 = 0;

/// Reserved id for the unknown (out-of-vocabulary) token
pub const UNK_ID: u32 = 1;

/// Spelling of the padding token
pub const PAD_TOKEN: &str = "<pad>";

/// Spelling of the unknown token
pub const UNK_TOKEN: &str = "<unk>";

/// Token ↔ id mapping. Ids are dense: 0..len().
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary containing only the two reserved tokens.
    pub fn new() -> Self {
        let mut vocab = Self {
            token_to_id: HashMap::new(),
            id_to_token: Vec::new(),
        };
        vocab.add_token(PAD_TOKEN);
        vocab.add_token(UNK_TOKEN);
        vocab
    }

    /// Insert a token if absent; returns its id either way.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        let id = self.id_to_token.len() as u32;
        self.token_to_id.insert(token.to_string(), id);
        self.id_to_token.push(token.to_string());
        id
    }

    /// Look up a token, falling back to <unk> for unseen words.
    pub fn id_of(&self, token: &str) -> u32 {
        self.token_to_id.get(token).copied().unwrap_or(UNK_ID)
    }

    /// Reverse lookup — mostly useful for debugging output
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(|s| s.as_str())
    }

    /// Does this vocabulary contain the token (reserved tokens included)?
    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Number of entries, reserved rows included
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Map a token sequence to ids, sending unseen words to <unk>.
    pub fn encode(&self, tokens: &[String]) -> Vec<u32> {
        tokens.iter().map(|t| self.id_of(t)).collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids_come_first() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.id_of(PAD_TOKEN), PAD_ID);
        assert_eq!(vocab.id_of(UNK_TOKEN), UNK_ID);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_add_token_is_idempotent() {
        let mut vocab = Vocabulary::new();
        let first  = vocab.add_token("dog");
        let second = vocab.add_token("dog");
        assert_eq!(first, second);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_unseen_tokens_map_to_unk() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("dog");
        let ids = vocab.encode(&["dog".into(), "unicorn".into()]);
        assert_eq!(ids, vec![2, UNK_ID]);
    }

    #[test]
    fn test_reverse_lookup() {
        let mut vocab = Vocabulary::new();
        let id = vocab.add_token("cat");
        assert_eq!(vocab.token_of(id), Some("cat"));
        assert_eq!(vocab.token_of(999), None);
    }
}
