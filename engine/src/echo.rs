//! Reference backend that replays the prompt.
//!
//! `EchoEngine` streams the input ids straight back, so the chat page shows
//! exactly the text a model would have received. That makes prompt
//! construction inspectable without a model runtime; a real runtime
//! implements [`TextEngine`] and takes its place in the binary.

use async_trait::async_trait;
use tracing::info;

use crate::config::EngineConfig;
use crate::stop::StopConfig;
use crate::token::{TokenBatch, TokenId};
use crate::traits::{EngineError, TextEngine, TokenStream};

#[derive(Clone, Debug, Default)]
pub struct EchoEngine;

impl EchoEngine {
    pub fn new() -> Self {
        Self
    }

    /// Backend-style constructor taking the demo's bootstrap config.
    pub fn load(config: &EngineConfig) -> Result<Self, EngineError> {
        if let Some(path) = &config.model_path {
            info!(
                "echo backend loads no weights; ignoring model at {}",
                path.display()
            );
        }
        info!(dtype = %config.dtype, "echo backend ready");
        Ok(Self)
    }
}

#[async_trait]
impl TextEngine for EchoEngine {
    async fn generate(
        &self,
        input: TokenBatch,
        stop: &StopConfig,
    ) -> Result<TokenStream, EngineError> {
        let mut out: Vec<TokenId> = Vec::with_capacity(input.len());
        for id in input.into_ids() {
            out.push(id);
            if let Some(n) = stop.matching_suffix_len(&out) {
                out.truncate(out.len() - n);
                break;
            }
        }
        Ok(Box::pin(tokio_stream::iter(out.into_iter().map(Ok))))
    }
}
