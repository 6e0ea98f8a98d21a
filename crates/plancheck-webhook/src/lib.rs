//! Plancheck Webhook
//!
//! HTTP service the conversational-assistant front end calls. Routes each
//! request to a chat-forwarding, document-answering or provider-listing
//! handler, and answers benefit questions by resolving facts from policy
//! documents.

#![warn(missing_docs)]

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod providers;
pub mod reply;

use config::WebhookConfig;
use handlers::{create_router, AppState};
use plancheck_discovery::{AssistantApiClient, AssistantError, DiscoveryClient, SearchError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Webhook error
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Search client could not be created
    #[error("Search client error: {0}")]
    Search(#[from] SearchError),

    /// Assistant client could not be created
    #[error("Assistant client error: {0}")]
    Assistant(#[from] AssistantError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build application state with HTTP clients for the configured services
pub fn build_state(config: &WebhookConfig) -> Result<AppState, WebhookError> {
    let search = DiscoveryClient::new(config.discovery.endpoint(), config.request_timeout_secs)?;
    let assistant =
        AssistantApiClient::new(config.assistant.endpoint(), config.request_timeout_secs)?;

    Ok(AppState::new(Arc::new(search), Arc::new(assistant))
        .with_search_defaults(config.discovery.filter.clone(), config.discovery.count))
}

/// Start the webhook HTTP server
///
/// Validates configuration, builds the upstream clients and serves until
/// interrupted.
pub async fn start_server(config: WebhookConfig) -> Result<(), WebhookError> {
    config.validate()?;

    info!("Starting Plancheck webhook");
    info!("Bind address: {}", config.bind_addr());
    info!("Search filter: {}", config.discovery.filter);
    info!("Search result count: {}", config.discovery.count);

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        warn!(?missing, "Upstream credentials are not configured; calls will be rejected");
    }

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Webhook listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    info!("Webhook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
