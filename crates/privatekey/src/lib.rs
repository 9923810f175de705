//! Private-key contract
//!
//! Stores a shared secret and a patient key at initialization and only
//! serves reads to callers that present the secret.
//!
//! ## Operations
//!
//! - `init(secret, patientKey)` - store both values
//! - `read(secret, key)` - gated read of `key`

pub mod gate;
pub mod models;

use async_trait::async_trait;
use ledger_common::{positional_args, Contract, Error, KeyValueStore, Result, Surface};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use gate::{AccessGate, Secret, PRIVATE_KEY};
pub use models::SimplePatientRecord;

/// Key holding the patient key written at initialization
pub const PATIENT_KEY: &str = "patient_key";

/// `read(secret, key)`
#[derive(Clone, PartialEq, Eq)]
pub struct GatedReadRequest {
    pub secret: String,
    pub key: String,
}

impl GatedReadRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [secret, key] = positional_args::<2>("read", args)?;
        Ok(Self { secret, key })
    }
}

pub struct PrivateKeyContract {
    store: Arc<dyn KeyValueStore>,
}

impl PrivateKeyContract {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Gate for the current instance secret
    pub async fn gate(&self) -> Result<AccessGate> {
        let secret = Secret::load(self.store.as_ref()).await?;
        Ok(AccessGate::new(secret, self.store.clone()))
    }

    pub async fn read(&self, request: GatedReadRequest) -> Result<Vec<u8>> {
        self.gate()
            .await?
            .check_and_read(&request.secret, &request.key)
            .await
    }
}

#[async_trait]
impl Contract for PrivateKeyContract {
    fn name(&self) -> &'static str {
        "privatekey"
    }

    async fn init(&self, args: &[String]) -> Result<Option<Vec<u8>>> {
        let [secret, patient_key] = positional_args::<2>("init", args)?;

        self.store
            .put_all(&[
                (PRIVATE_KEY, secret.as_bytes()),
                (PATIENT_KEY, patient_key.as_bytes()),
            ])
            .await?;

        info!("Private-key contract initialized");
        Ok(None)
    }

    async fn invoke(&self, function: &str, args: &[String]) -> Result<Option<Vec<u8>>> {
        debug!("invoke is running {}", function);

        match function {
            "init" => self.init(args).await,
            _ => {
                warn!("invoke did not find func: {}", function);
                Err(Error::UnknownOperation {
                    surface: Surface::Invoke,
                    function: function.to_string(),
                })
            }
        }
    }

    async fn query(&self, function: &str, args: &[String]) -> Result<Option<Vec<u8>>> {
        debug!("query is running {}", function);

        match function {
            "read" => self.read(GatedReadRequest::from_args(args)?).await.map(Some),
            _ => {
                warn!("query did not find func: {}", function);
                Err(Error::UnknownOperation {
                    surface: Surface::Query,
                    function: function.to_string(),
                })
            }
        }
    }
}
