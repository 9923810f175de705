use crate::contract::Surface;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Incorrect number of arguments for {function}: expected {expected}, got {actual}")]
    Arity {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Received unknown function {surface}: {function}")]
    UnknownOperation { surface: Surface, function: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Failed to get state for {0}")]
    NotFound(String),

    #[error("Malformed composite value: {0}")]
    Parse(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
