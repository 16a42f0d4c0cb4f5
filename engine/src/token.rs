/// Vocabulary token id, matching the id width of the `tokenizers` crate.
pub type TokenId = u32;

/// A single batch row of token ids, ready for an inference backend.
///
/// Always host memory; a backend that wants the ids somewhere else does the
/// transfer itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBatch {
    ids: Vec<TokenId>,
}

impl TokenBatch {
    pub fn new(ids: Vec<TokenId>) -> Self {
        Self { ids }
    }

    /// Sequence length of the batch row.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[TokenId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<TokenId> {
        self.ids
    }
}
