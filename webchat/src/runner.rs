use std::sync::Arc;

use chat::{Banner, ChatPolicy, Conversation};
use engine::{EngineError, PromptTokenizer, StopConfig, TextEngine, TokenId};
use tokio::sync::{Mutex, mpsc};
use tokio_stream::StreamExt;
use tracing::{debug, info};

/// Generic chat loop: owns the conversation history and drives the engine
/// with whatever policy it was given.
///
/// One `ChatRunner` is one chat session. Each submission runs to completion
/// before the next is taken; independent sessions get independent runners.
pub struct ChatRunner {
    policy: Arc<dyn ChatPolicy>,
    engine: Arc<dyn TextEngine>,
    tokenizer: Arc<dyn PromptTokenizer>,
    conversation: Mutex<Conversation>,
    stop: StopConfig,
}

impl ChatRunner {
    pub fn new(
        policy: Arc<dyn ChatPolicy>,
        engine: Arc<dyn TextEngine>,
        tokenizer: Arc<dyn PromptTokenizer>,
    ) -> Self {
        // The stop configuration is fixed per session; fetch it once.
        let stop = policy.stop_ids();
        Self {
            policy,
            engine,
            tokenizer,
            conversation: Mutex::new(Conversation::new()),
            stop,
        }
    }

    /// Answer one submission.
    ///
    /// Streams display-text deltas over `delta_tx` while generation runs,
    /// then appends the completed turn to the history and returns the full
    /// reply. Policy and engine errors propagate to the caller; the history
    /// is only updated on success.
    pub async fn respond(
        &self,
        query: &str,
        delta_tx: mpsc::UnboundedSender<String>,
    ) -> Result<String, EngineError> {
        let history = self.conversation.lock().await.clone();
        let input = self
            .policy
            .input_tokens(query, &history, self.tokenizer.as_ref())?;
        debug!(prompt_tokens = input.len(), "prompt ready");

        let mut stream = self.engine.generate(input, &self.stop).await?;
        let mut ids: Vec<TokenId> = Vec::new();
        let mut sent = String::new();
        while let Some(next) = stream.next().await {
            ids.push(next?);
            // Decode the whole sequence each step and forward the new
            // suffix. A trailing replacement char means the last code point
            // is still incomplete; hold it back until the next token.
            let decoded = self.tokenizer.decode(&ids)?;
            let stable = decoded.strip_suffix('\u{FFFD}').unwrap_or(&decoded);
            if let Some(delta) = stable.strip_prefix(sent.as_str()) {
                if !delta.is_empty() {
                    let _ = delta_tx.send(delta.to_string());
                    sent = stable.to_string();
                }
            }
        }

        let reply = self.tokenizer.decode(&ids)?;
        info!(reply_tokens = ids.len(), "generation complete");
        self.conversation
            .lock()
            .await
            .push_exchange(query, reply.clone());
        Ok(reply)
    }

    /// Drop the whole history.
    pub async fn clear(&self) {
        self.conversation.lock().await.clear();
        info!("conversation cleared");
    }

    /// Snapshot of the history for the conversation endpoint.
    pub async fn history(&self) -> Conversation {
        self.conversation.lock().await.clone()
    }

    pub fn banner(&self) -> Banner {
        self.policy.banner()
    }
}
