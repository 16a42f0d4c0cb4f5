//! Tokenizer collaborator backed by the `tokenizers` crate.

use std::path::Path;

use tracing::info;

use crate::token::{TokenBatch, TokenId};
use crate::traits::{EngineError, PromptTokenizer};

/// Hugging Face tokenizer loaded from a `tokenizer.json` file.
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| EngineError::Tokenizer(e.to_string()))?;
        info!("loaded tokenizer from {}", path.display());
        Ok(Self { inner })
    }
}

impl PromptTokenizer for HfTokenizer {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<TokenBatch, EngineError> {
        let encoding = self
            .inner
            .encode(text, add_special_tokens)
            .map_err(|e| EngineError::Tokenizer(e.to_string()))?;
        Ok(TokenBatch::new(encoding.get_ids().to_vec()))
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String, EngineError> {
        // Special markers never reach the page; the UI renders plain text.
        self.inner
            .decode(ids, true)
            .map_err(|e| EngineError::Tokenizer(e.to_string()))
    }
}
