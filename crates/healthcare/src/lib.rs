//! Healthcare contract
//!
//! Stores structured patient records keyed by identity and assignment
//! mappings from a certificate identifier to a `(target key, identifier)`
//! pair.
//!
//! ## Operations
//!
//! - `init(greeting)` - store a greeting under `hello_blockchain`
//! - `write(14 fields)` - store a [`PatientRecord`] under its username
//! - `assign(certId, targetKey, identifier)` - store an [`Assignment`]
//! - `read(key)` - raw bytes under `key`
//! - `readAssign(certId, targetKey)` - resolve an assignment

pub mod assignment;
pub mod record;
pub mod requests;

use async_trait::async_trait;
use ledger_common::{positional_args, Contract, Error, KeyValueStore, Result, Surface};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use assignment::Assignment;
pub use record::{PatientRecord, ReportType};
pub use requests::{AssignRequest, ReadAssignRequest, ReadRequest, WritePatientRequest};

/// Key written by `init`
pub const GREETING_KEY: &str = "hello_blockchain";

pub struct HealthcareContract {
    store: Arc<dyn KeyValueStore>,
}

impl HealthcareContract {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Store a patient record under its username, replacing any earlier one
    pub async fn write(&self, request: WritePatientRequest) -> Result<()> {
        let record = PatientRecord::from(request);
        let value = record.encode()?;

        self.store.put(&record.username, &value).await?;

        info!("Stored patient record: {}", record.username);
        Ok(())
    }

    /// Map a certificate to a `(target key, identifier)` pair
    pub async fn assign(&self, request: AssignRequest) -> Result<()> {
        let assignment = Assignment::new(request.target_key, request.identifier);
        self.store.put(&request.cert_id, &assignment.encode()?).await?;

        info!("Assigned certificate {} -> {}", request.cert_id, assignment);
        Ok(())
    }

    pub async fn read(&self, request: ReadRequest) -> Result<Vec<u8>> {
        self.store.get_required(&request.key).await
    }

    /// Follow a certificate's assignment to the value stored under its identifier
    ///
    /// Returns `Ok(None)` when the assignment points at a different target key.
    pub async fn resolve_assignment(&self, request: ReadAssignRequest) -> Result<Option<Vec<u8>>> {
        let stored = self.store.get_required(&request.cert_id).await?;
        let assignment = Assignment::decode(&stored)?;

        if assignment.target_key != request.expected_target_key {
            warn!(
                "Assignment for {} does not match target key {}",
                request.cert_id, request.expected_target_key
            );
            return Ok(None);
        }

        let value = self.store.get_required(&assignment.identifier).await?;
        Ok(Some(value))
    }
}

#[async_trait]
impl Contract for HealthcareContract {
    fn name(&self) -> &'static str {
        "healthcare"
    }

    async fn init(&self, args: &[String]) -> Result<Option<Vec<u8>>> {
        let [greeting] = positional_args::<1>("init", args)?;
        self.store.put(GREETING_KEY, greeting.as_bytes()).await?;

        info!("Healthcare contract initialized");
        Ok(None)
    }

    async fn invoke(&self, function: &str, args: &[String]) -> Result<Option<Vec<u8>>> {
        debug!("invoke is running {}", function);

        match function {
            "init" => self.init(args).await,
            "write" => {
                self.write(WritePatientRequest::from_args(args)?).await?;
                Ok(None)
            }
            "assign" => {
                self.assign(AssignRequest::from_args(args)?).await?;
                Ok(None)
            }
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
            "read" => self.read(ReadRequest::from_args(args)?).await.map(Some),
            "readAssign" => self.resolve_assignment(ReadAssignRequest::from_args(args)?).await,
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
