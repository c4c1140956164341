//! Derivws App binary.
//!
//! Entry point that opens a session and keeps it alive until Ctrl-C.

use derivws_app::{AppConfig, AppService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,derivws_sdk=debug,derivws_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env()?;

    tracing::info!("Starting Derivws session");
    tracing::info!("Endpoint: {}", config.ws_url);
    tracing::info!("App id: {}", config.app_id);
    tracing::info!("Account: {}", config.account);

    let mut service = AppService::new(config)?;
    service
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await?;

    tracing::info!("Session stopped");

    Ok(())
}
