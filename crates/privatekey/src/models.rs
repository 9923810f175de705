//! Record shapes of the private-key contract

use serde::{Deserialize, Serialize};

/// Simple patient record
///
/// Declared schema only: no operation of this contract constructs or writes
/// it. `init` stores two scalar values, not this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePatientRecord {
    pub id: String,
    pub name: String,
    pub age: String,
    pub weight: String,
    pub description: String,
}
