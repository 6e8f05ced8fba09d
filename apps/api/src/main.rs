mod chat;
mod config;
mod errors;
mod knowledge;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge::chunks::all_chunks;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on a malformed PORT)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Neural Core v{}", env!("CARGO_PKG_VERSION"));
    let chunk_names: Vec<&str> = all_chunks().iter().map(|c| c.name()).collect();
    info!("Knowledge base loaded: {:?}", chunk_names);

    // Initialize LLM client; a missing key degrades /chat instead of aborting startup
    let llm: Option<Arc<dyn CompletionProvider>> = match config.groq_api_key.clone() {
        Some(api_key) => {
            let client: Arc<dyn CompletionProvider> = Arc::new(LlmClient::new(api_key)?);
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("GROQ_API_KEY not set; /chat will answer with a configuration error");
            None
        }
    };

    let app = build_router(AppState { llm });

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
