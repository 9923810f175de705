//! Contract host service

use anyhow::{Context, Result};
use contract_host::{config::Config, create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "contract_host=debug,healthcare_contract=debug,privatekey_contract=debug,ledger_common=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contract host");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Store backend: {:?}", config.store_backend);

    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!("Contract host listening on http://{}", config.api_address());

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
