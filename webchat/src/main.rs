use clap::Parser;
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, atomic::AtomicUsize},
};
use tokio::sync::broadcast;
use tracing::info;

use chat::Gemma;
use engine::{DType, EchoEngine, EngineConfig, HfTokenizer};
use webchat::{AppState, ChatRunner, app, init_logging};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, default_value = "127.0.0.1:7860")]
    addr: String,
    /// Directory containing the model's tokenizer.json
    #[arg(short = 't', long)]
    token_path: PathBuf,
    /// Path to the converted model weights, handed to the linked backend
    #[arg(short = 'm', long)]
    model_path: Option<PathBuf>,
    /// Weight data type for the backend
    #[arg(short = 'd', long, default_value = "bf16")]
    dtype: DType,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (log_tx, log_rx) = broadcast::channel(256);
    init_logging(log_tx);

    let tokenizer = HfTokenizer::from_file(cli.token_path.join("tokenizer.json"))?;
    let config = EngineConfig {
        model_path: cli.model_path,
        dtype: cli.dtype,
    };
    let engine = EchoEngine::load(&config)?;
    let runner = Arc::new(ChatRunner::new(
        Arc::new(Gemma::new()),
        Arc::new(engine),
        Arc::new(tokenizer),
    ));

    let state = AppState {
        runner,
        logs: Arc::new(log_rx),
        connections: Arc::new(AtomicUsize::new(0)),
    };
    let app = app(state);

    let addr: SocketAddr = cli.addr.parse()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
