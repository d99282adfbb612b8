// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::load_gateway_config;
use crate::infrastructure::memory_store::InMemoryMetricStore;
use crate::infrastructure::seed_loader::load_metrics;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_gateway_config().context("Failed to load configuration")?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create metric store (infrastructure layer)
    let records = match &config.storage.seed_path {
        Some(path) => load_metrics(path).await?,
        None => {
            tracing::warn!("No storage.seed_path configured, starting with an empty metric store");
            Vec::new()
        }
    };
    let store = Arc::new(InMemoryMetricStore::new(records)?);
    tracing::info!("Metric store ready with {} records", store.len().await);

    // Create services (application layer) behind the shared state
    let state = Arc::new(AppState::new(store, config.rollup));

    // Build router (presentation layer)
    let router = build_router(state, config.server.request_timeout());

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting metrics-gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
