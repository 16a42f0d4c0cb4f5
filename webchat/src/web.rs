use axum::{
    Router,
    extract::{
        State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    response::{Html, IntoResponse},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info};

use crate::ChatRunner;

/// State shared across HTTP handlers and WebSocket tasks.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<ChatRunner>,
    pub logs: Arc<broadcast::Receiver<String>>,
    pub connections: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WsRequest {
    Chat { data: String },
    Clear,
}

#[derive(Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
enum WsResponse {
    Delta(String),
    Done(String),
    Cleared,
    Error(String),
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

pub async fn banner(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.runner.banner())
}

pub async fn conversation_log(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.runner.history().await)
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    info!("websocket upgrade initiated");
    ws.on_upgrade(move |socket| async move { handle_socket(socket, state).await })
}

pub async fn log_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    info!("log websocket upgrade initiated");
    ws.on_upgrade(move |socket| async move { handle_log_socket(socket, state).await })
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    info!("websocket connected");
    state.connections.fetch_add(1, Ordering::SeqCst);
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(WsMessage::Text(text)) => {
                let Ok(req) = serde_json::from_str::<WsRequest>(&text) else {
                    continue;
                };
                match req {
                    WsRequest::Chat { data: query } => {
                        debug!("user message: {}", query);
                        if chat_round(&mut socket, &state, query).await.is_err() {
                            break;
                        }
                    }
                    WsRequest::Clear => {
                        state.runner.clear().await;
                        if send(&mut socket, &WsResponse::Cleared).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Ok(WsMessage::Close(_)) | Err(_) => break,
            _ => {}
        }
    }
    state.connections.fetch_sub(1, Ordering::SeqCst);
    info!("websocket disconnected");
}

/// Run one submission, forwarding deltas as they stream.
///
/// One round at a time per socket; the next request is read only after the
/// reply (or error) went out.
async fn chat_round(
    socket: &mut WebSocket,
    state: &AppState,
    query: String,
) -> Result<(), axum::Error> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = state.runner.clone();
    let task = tokio::spawn(async move { runner.respond(&query, tx).await });

    while let Some(chunk) = rx.recv().await {
        send(socket, &WsResponse::Delta(chunk)).await?;
    }
    match task.await {
        Ok(Ok(reply)) => send(socket, &WsResponse::Done(reply)).await,
        Ok(Err(err)) => {
            error!("generation failed: {err}");
            send(socket, &WsResponse::Error(err.to_string())).await
        }
        Err(err) => {
            error!("generation task panicked: {err}");
            send(socket, &WsResponse::Error("internal error".into())).await
        }
    }
}

async fn send(socket: &mut WebSocket, msg: &WsResponse) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(msg).unwrap();
    socket.send(WsMessage::Text(payload.into())).await
}

async fn handle_log_socket(mut socket: WebSocket, state: AppState) {
    info!("log websocket connected");
    let mut logs = state.logs.resubscribe();
    while let Ok(line) = logs.recv().await {
        if socket.send(WsMessage::Text(line.into())).await.is_err() {
            break;
        }
    }
    info!("log websocket disconnected");
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/banner", get(banner))
        .route("/ws", get(ws_handler))
        .route("/log", get(log_ws_handler))
        .route("/conversation", get(conversation_log))
        .with_state(state)
}
