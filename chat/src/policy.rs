use engine::{EngineError, PromptTokenizer, StopConfig, TokenBatch};
use serde::Serialize;

use crate::conversation::Conversation;

/// Static labels for the demo page header.
#[derive(Clone, Debug, Serialize)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
}

/// Strategy object a chat runner consumes: prompt construction, stop
/// configuration and branding for one model family.
///
/// The runner owns the history and the engine handle; a policy holds no
/// conversation state of its own.
pub trait ChatPolicy: Send + Sync {
    /// Turn the live query plus prior history into engine-ready input ids.
    ///
    /// Tokenizer errors propagate untransformed; this is a pure
    /// transformation stage with no recovery of its own.
    fn input_tokens(
        &self,
        query: &str,
        history: &Conversation,
        tokenizer: &dyn PromptTokenizer,
    ) -> Result<TokenBatch, EngineError>;

    /// Token-id sequences that terminate generation. Constant per session,
    /// never derived from conversation content.
    fn stop_ids(&self) -> StopConfig;

    /// Header labels for the front-end.
    fn banner(&self) -> Banner;
}
