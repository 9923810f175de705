//! Assignment mappings from a certificate to a `(target key, identifier)` pair
//!
//! New assignments are stored as a tagged JSON pair. The older
//! `target:identifier` composite form is still understood when decoding, so
//! mappings written that way keep resolving.

use ledger_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator of the composite form
pub const DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub target_key: String,
    pub identifier: String,
}

impl Assignment {
    pub fn new(target_key: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            identifier: identifier.into(),
        }
    }

    /// Join both parts with [`DELIMITER`]
    ///
    /// The parts are not escaped: a delimiter inside `target_key` does not
    /// survive [`Assignment::parse`].
    pub fn compose(&self) -> String {
        format!("{}{}{}", self.target_key, DELIMITER, self.identifier)
    }

    /// Split a composite value and keep its first two segments
    pub fn parse(composite: &str) -> Result<Self> {
        let mut segments = composite.split(DELIMITER);
        match (segments.next(), segments.next()) {
            (Some(target_key), Some(identifier)) => Ok(Self::new(target_key, identifier)),
            _ => Err(Error::Parse(format!(
                "expected `target{}identifier`, got {:?}",
                DELIMITER, composite
            ))),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a stored value in either the tagged or the composite form
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if let Ok(assignment) = serde_json::from_slice::<Assignment>(bytes) {
            return Ok(assignment);
        }

        let composite = std::str::from_utf8(bytes)
            .map_err(|e| Error::Parse(format!("assignment is not valid UTF-8: {}", e)))?;
        Self::parse(composite)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose())
    }
}
