//! Plancheck Webhook CLI
//!
//! Starts the webhook HTTP server.

use anyhow::Context;
use clap::Parser;
use plancheck_webhook::{config::WebhookConfig, init_tracing, start_server};
use std::path::PathBuf;
use tracing::warn;

/// Webhook bridging the benefits assistant to backend services
#[derive(Parser, Debug)]
#[command(name = "plancheck-webhook")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "PLANCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address as address:port (overrides the config file)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => WebhookConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults and environment");
            WebhookConfig::default()
        }
    };

    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(bind) = &cli.bind {
        config.set_bind(bind)?;
    }

    start_server(config).await?;
    Ok(())
}
