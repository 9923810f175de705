//! Contract host
//!
//! Serves the healthcare and private-key contracts over HTTP. Each contract
//! is mounted under its own name and keeps its state in its own store
//! namespace.
//!
//! ## Endpoints
//!
//! - `POST /api/{contract}/init` - Initialize a contract instance
//! - `POST /api/{contract}/invoke` - State-changing operation
//! - `POST /api/{contract}/query` - Read-only operation
//! - `GET /health` - Health check

pub mod config;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use healthcare_contract::HealthcareContract;
use ledger_common::{Contract, KeyValueStore, MemoryStore, RedisStore};
use privatekey_contract::PrivateKeyContract;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use config::{Config, StoreBackend};

/// Application state shared across handlers
#[derive(Default)]
pub struct AppState {
    contracts: HashMap<&'static str, Arc<dyn Contract>>,
}

impl AppState {
    /// Mount the given contracts under their names
    pub fn new(contracts: Vec<Arc<dyn Contract>>) -> Self {
        let contracts = contracts
            .into_iter()
            .map(|contract| (contract.name(), contract))
            .collect();
        Self { contracts }
    }

    /// Mount both contracts on the given stores
    pub fn with_stores(
        healthcare: Arc<dyn KeyValueStore>,
        privatekey: Arc<dyn KeyValueStore>,
    ) -> Self {
        let healthcare: Arc<dyn Contract> = Arc::new(HealthcareContract::new(healthcare));
        let privatekey: Arc<dyn Contract> = Arc::new(PrivateKeyContract::new(privatekey));
        Self::new(vec![healthcare, privatekey])
    }

    /// Both contracts, each backed by its own in-memory store
    pub fn in_memory() -> Self {
        Self::with_stores(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Build state for the configured store back end
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.store_backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            StoreBackend::Redis => {
                let healthcare: Arc<dyn KeyValueStore> = Arc::new(
                    RedisStore::new(&config.redis_url, "healthcare")
                        .await
                        .context("Failed to initialize healthcare storage")?,
                );
                let privatekey: Arc<dyn KeyValueStore> = Arc::new(
                    RedisStore::new(&config.redis_url, "privatekey")
                        .await
                        .context("Failed to initialize privatekey storage")?,
                );

                Ok(Self::with_stores(healthcare, privatekey))
            }
        }
    }

    pub fn contract(&self, name: &str) -> Option<Arc<dyn Contract>> {
        self.contracts.get(name).cloned()
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/{contract}/init", post(handlers::init_handler))
        .route("/api/{contract}/invoke", post(handlers::invoke_handler))
        .route("/api/{contract}/query", post(handlers::query_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
