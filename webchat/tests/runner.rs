use std::sync::Arc;

use async_trait::async_trait;
use chat::{Banner, ChatPolicy, Conversation, Gemma};
use engine::{
    EchoEngine, EngineError, PromptTokenizer, StopConfig, TextEngine, TokenBatch, TokenId,
    TokenStream,
};
use tokio::sync::mpsc;
use webchat::ChatRunner;

/// Byte-level tokenizer: one id per UTF-8 byte, id 1 as the boundary token.
struct ByteTokenizer;

impl PromptTokenizer for ByteTokenizer {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<TokenBatch, EngineError> {
        let mut ids: Vec<TokenId> = Vec::new();
        if add_special_tokens {
            ids.push(1);
        }
        ids.extend(text.bytes().map(TokenId::from));
        Ok(TokenBatch::new(ids))
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String, EngineError> {
        let bytes: Vec<u8> = ids.iter().filter(|&&id| id > 1).map(|&id| id as u8).collect();
        String::from_utf8(bytes).map_err(|e| EngineError::Tokenizer(e.to_string()))
    }
}

struct FailingEngine;

#[async_trait]
impl TextEngine for FailingEngine {
    async fn generate(
        &self,
        _input: TokenBatch,
        _stop: &StopConfig,
    ) -> Result<TokenStream, EngineError> {
        Err(EngineError::Backend("gpu on fire".into()))
    }
}

fn echo_runner() -> ChatRunner {
    ChatRunner::new(
        Arc::new(Gemma::new()),
        Arc::new(EchoEngine::new()),
        Arc::new(ByteTokenizer),
    )
}

async fn drain(mut rx: mpsc::UnboundedReceiver<String>) -> String {
    let mut out = String::new();
    while let Some(chunk) = rx.recv().await {
        out.push_str(&chunk);
    }
    out
}

#[tokio::test]
async fn reply_is_recorded_and_deltas_add_up() {
    let runner = echo_runner();
    let (tx, rx) = mpsc::unbounded_channel();
    let reply = runner.respond("Hello", tx).await.expect("respond");

    // The echo backend replays the rendered prompt.
    assert!(reply.contains("Hello"));
    assert_eq!(drain(rx).await, reply);

    let history = runner.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.turns()[0].user.as_deref(), Some("Hello"));
    assert_eq!(history.turns()[0].model.as_deref(), Some(reply.as_str()));
}

#[tokio::test]
async fn second_turn_sees_the_first() {
    let runner = echo_runner();
    let (tx, _rx) = mpsc::unbounded_channel();
    let first = runner.respond("alpha", tx).await.expect("respond");

    let (tx, _rx) = mpsc::unbounded_channel();
    let second = runner.respond("beta", tx).await.expect("respond");

    // The replayed prompt for the second turn carries the whole exchange.
    assert!(second.contains("alpha"));
    assert!(second.contains(&first));
    assert!(second.contains("beta"));
    assert_eq!(runner.history().await.len(), 2);
}

#[tokio::test]
async fn clear_forgets_the_conversation() {
    let runner = echo_runner();
    let (tx, _rx) = mpsc::unbounded_channel();
    runner.respond("remember me", tx).await.expect("respond");
    runner.clear().await;
    assert!(runner.history().await.is_empty());

    let (tx, _rx) = mpsc::unbounded_channel();
    let reply = runner.respond("fresh", tx).await.expect("respond");
    assert!(!reply.contains("remember me"));
}

#[tokio::test]
async fn engine_errors_leave_the_history_untouched() {
    let runner = ChatRunner::new(
        Arc::new(Gemma::new()),
        Arc::new(FailingEngine),
        Arc::new(ByteTokenizer),
    );
    let (tx, _rx) = mpsc::unbounded_channel();
    let err = runner.respond("boom", tx).await.expect_err("must fail");
    assert!(matches!(err, EngineError::Backend(_)));
    assert!(runner.history().await.is_empty());
}

#[tokio::test]
async fn banner_comes_from_the_policy() {
    let Banner { title, subtitle } = echo_runner().banner();
    assert_eq!(title, "webchat");
    assert_eq!(subtitle, "Gemma");
}
