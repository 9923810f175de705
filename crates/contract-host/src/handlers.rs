//! API request handlers for contract calls

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ledger_common::{Contract, Error};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::AppState;

/// Request to initialize a contract instance
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<String>,
}

/// Request to invoke or query a contract operation
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    /// Operation name
    pub function: String,

    /// Positional arguments
    #[serde(default)]
    pub args: Vec<String>,
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Arity { .. } => StatusCode::BAD_REQUEST,
            Error::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UnknownOperation { .. } | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AccessDenied => StatusCode::FORBIDDEN,
            Error::Store(_) | Error::JsonSerialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!("Contract call failed: {}", err);
        }

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

fn lookup(state: &AppState, name: &str) -> Result<Arc<dyn Contract>, ApiError> {
    state.contract(name).ok_or_else(|| ApiError {
        status: StatusCode::NOT_FOUND,
        message: format!("Unknown contract: {}", name),
    })
}

/// Raw payload as octet-stream, or 204 when the call produced none
fn payload_response(payload: Option<Vec<u8>>) -> Response {
    match payload {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "contract-host"
    }))
}

/// Initialize a contract instance
pub async fn init_handler(
    State(state): State<Arc<AppState>>,
    Path(contract): Path<String>,
    Json(payload): Json<InitRequest>,
) -> Result<Response, ApiError> {
    debug!("Init {} with {} args", contract, payload.args.len());

    let target = lookup(&state, &contract)?;
    let result = target.init(&payload.args).await?;

    Ok(payload_response(result))
}

/// Route a state-changing operation
pub async fn invoke_handler(
    State(state): State<Arc<AppState>>,
    Path(contract): Path<String>,
    Json(payload): Json<CallRequest>,
) -> Result<Response, ApiError> {
    debug!("Invoke {}.{}", contract, payload.function);

    let target = lookup(&state, &contract)?;
    let result = target.invoke(&payload.function, &payload.args).await?;

    Ok(payload_response(result))
}

/// Route a read-only operation
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    Path(contract): Path<String>,
    Json(payload): Json<CallRequest>,
) -> Result<Response, ApiError> {
    debug!("Query {}.{}", contract, payload.function);

    let target = lookup(&state, &contract)?;
    let result = target.query(&payload.function, &payload.args).await?;

    Ok(payload_response(result))
}
