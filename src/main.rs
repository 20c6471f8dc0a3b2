use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use limbic::{config, server, EmotionAnalyzer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory containing model.onnx and tokenizer.json; overrides
    /// MODEL_PATH and the built-in fallback locations
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model_dir = config::resolve_model_dir(args.model_dir);
    info!("Loading emotion model from {}", model_dir.display());

    let analyzer = Arc::new(EmotionAnalyzer::initialize(&model_dir));
    if !analyzer.is_ready() {
        warn!("Model failed to load; serving anyway, /analyze will report errors");
    }

    let app = server::router(analyzer);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.host, args.port)).await?;
    info!("Emotion Analysis API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
