mod config;
mod content;
mod errors;
mod flow;
mod gateway;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content::{seed, ContentStore};
use crate::flow::FlowController;
use crate::gateway::llm::LlmGateway;
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
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Future Career AI API v{}", env!("CARGO_PKG_VERSION"));

    // Content store, seeded in memory
    let store = ContentStore::with_materials(seed::initial_materials(), config.store_latency)?;
    info!(
        "Content store seeded (latency: {}ms)",
        config.store_latency.as_millis()
    );

    // Initialize LLM client and the recommendation gateway on top of it
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!(
        "LLM client initialized (model: {}, language: {})",
        llm_client::MODEL,
        config.response_language
    );
    let gateway = Arc::new(LlmGateway::new(llm, config.response_language.clone()));

    let flow = FlowController::new(store.clone(), gateway, config.admin_password.clone());
    flow.spawn_idle_sweeper(config.session_ttl);
    info!("Idle sessions expire after {}s", config.session_ttl.as_secs());

    // Build app state
    let state = AppState {
        flow,
        store,
        config: config.clone(),
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
