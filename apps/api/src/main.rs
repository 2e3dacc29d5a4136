mod auth;
mod config;
mod db;
mod debounce;
mod directory;
mod errors;
mod flows;
mod llm_client;
mod models;
mod pages;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum_extra::extract::cookie::Key;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::directory::{Directory, PgDirectoryStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Local Link API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the provider directory (degrades to empty results when unconfigured)
    let directory = match &config.database_url {
        Some(url) => Directory::new(Arc::new(PgDirectoryStore::new(create_pool(url)?))),
        None => Directory::unconfigured(),
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let session_key = build_session_key(&config)?;

    // Build app state
    let state = AppState {
        directory,
        llm: Arc::new(llm),
        config: config.clone(),
        session_key,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Session cookies are signed with `SESSION_SECRET` (at least 64 bytes) or,
/// when unset, a random key that does not survive restarts.
fn build_session_key(config: &Config) -> Result<Key> {
    match &config.session_secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|_| anyhow!("SESSION_SECRET must be at least 64 bytes")),
        None => {
            warn!("SESSION_SECRET not set; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}
