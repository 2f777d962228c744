//! shot-sequence-api server entry point.
//!
//! Loads configuration, opens the sequence store, and serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shot_sequence_api::api;
use shot_sequence_api::app_state::AppState;
use shot_sequence_api::config::AppConfig;
use shot_sequence_api::generation::{AnthropicClient, SequenceGenerator, TextGenerator};
use shot_sequence_api::persistence::open_store;
use shot_sequence_api::service::SequenceService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        addr = %config.listen_addr,
        environment = %config.environment,
        "starting shot-sequence-api"
    );

    // Build storage layer
    let store = open_store(&config.storage)
        .await
        .context("opening sequence store")?;

    // Build generation layer
    let generator = match &config.generation.api_key {
        Some(key) => {
            let client = AnthropicClient::new(&config.generation, key.clone())
                .context("building generation API client")?;
            tracing::info!(model = %config.generation.model, "sequence generation enabled");
            let client: Arc<dyn TextGenerator> = Arc::new(client);
            Some(SequenceGenerator::new(client))
        }
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set; sequence generation disabled");
            None
        }
    };

    // Build application
    let state = AppState::new(SequenceService::new(store, generator));
    let app = api::build_app(state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
