use async_trait::async_trait;
use futures_core::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::stop::StopConfig;
use crate::token::{TokenBatch, TokenId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("model not found")]
    ModelNotFound,
}

/// Stream of generated token ids.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<TokenId, EngineError>> + Send>>;

/// Text-to-ids boundary the chat runner depends on.
///
/// Implementations wrap an external tokenizer; this crate never builds one.
pub trait PromptTokenizer: Send + Sync {
    /// Encode `text` into a single batch row, optionally with the model's
    /// special boundary tokens.
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<TokenBatch, EngineError>;

    /// Decode generated ids back into display text.
    fn decode(&self, ids: &[TokenId]) -> Result<String, EngineError>;
}

/// Backend-agnostic interface for inference engines.
///
/// The engine owns halting: generation must stop once the produced tail
/// matches one of the configured stop sequences, and the matching stop ids
/// are not emitted downstream.
#[async_trait]
pub trait TextEngine: Send + Sync {
    async fn generate(
        &self,
        input: TokenBatch,
        stop: &StopConfig,
    ) -> Result<TokenStream, EngineError>;
}
