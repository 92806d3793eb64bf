//! Mockmate server binary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mockmate::config::AppConfig;
use mockmate::routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mockmate=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let addr = config.bind_addr;

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, chat endpoint will answer 500");
    }
    if config.openrouter_api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY not set, evaluate endpoint will answer 500");
    }

    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
