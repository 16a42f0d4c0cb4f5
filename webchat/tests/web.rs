use std::sync::{Arc, atomic::AtomicUsize};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chat::Gemma;
use engine::{EchoEngine, EngineError, PromptTokenizer, TokenBatch, TokenId};
use tokio::sync::broadcast;
use tower::ServiceExt;
use webchat::{AppState, ChatRunner, app};

struct ByteTokenizer;

impl PromptTokenizer for ByteTokenizer {
    fn encode(&self, text: &str, _add_special_tokens: bool) -> Result<TokenBatch, EngineError> {
        Ok(TokenBatch::new(text.bytes().map(TokenId::from).collect()))
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String, EngineError> {
        let bytes: Vec<u8> = ids.iter().map(|&id| id as u8).collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn test_state() -> AppState {
    let (_tx, rx) = broadcast::channel(8);
    AppState {
        runner: Arc::new(ChatRunner::new(
            Arc::new(Gemma::new()),
            Arc::new(EchoEngine::new()),
            Arc::new(ByteTokenizer),
        )),
        logs: Arc::new(rx),
        connections: Arc::new(AtomicUsize::new(0)),
    }
}

#[tokio::test]
async fn root_serves_the_chat_page() {
    let res = app(test_state())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("/banner"));
    assert!(page.contains("/ws"));
}

#[tokio::test]
async fn banner_returns_the_adapter_labels() {
    let res = app(test_state())
        .oneshot(Request::builder().uri("/banner").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let banner: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(banner["title"], "webchat");
    assert_eq!(banner["subtitle"], "Gemma");
}

#[tokio::test]
async fn conversation_starts_empty() {
    let res = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/conversation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let log: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(log["turns"], serde_json::json!([]));
}
