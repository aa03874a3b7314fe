mod compose;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::AiComposer;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumer v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; AI generation will fail with an authorization error");
    }

    // Initialize LLM client and the composer that owns it
    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let composer = AiComposer::new(Arc::new(llm));

    let state = AppState::new(composer, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
