//! Typed requests lifted from positional arguments
//!
//! Arity is validated here, before any handler touches the store.

use ledger_common::{positional_args, Result};

/// Fourteen positional fields of a `write` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePatientRequest {
    pub username: String,
    pub name: String,
    pub ailment: String,
    pub date_of_birth: String,
    pub gender: String,
    /// Discriminator (position 6)
    pub report_type: String,
    /// Position 7: report label for diabetes, minimum size for kidney
    pub detail_a: String,
    /// Position 8: pre-lunch reading for diabetes, maximum size for kidney
    pub detail_b: String,
    /// Position 9: disease, also the post-lunch reading for diabetes
    pub disease: String,
    pub on_going_medication: String,
    pub duration: String,
    pub tetanus: String,
    pub hepatitis_a: String,
    pub hepatitis_b: String,
}

impl WritePatientRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [
            username,
            name,
            ailment,
            date_of_birth,
            gender,
            report_type,
            detail_a,
            detail_b,
            disease,
            on_going_medication,
            duration,
            tetanus,
            hepatitis_a,
            hepatitis_b,
        ] = positional_args::<14>("write", args)?;

        Ok(Self {
            username,
            name,
            ailment,
            date_of_birth,
            gender,
            report_type,
            detail_a,
            detail_b,
            disease,
            on_going_medication,
            duration,
            tetanus,
            hepatitis_a,
            hepatitis_b,
        })
    }
}

/// `assign(certId, targetKey, identifier)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRequest {
    pub cert_id: String,
    pub target_key: String,
    pub identifier: String,
}

impl AssignRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [cert_id, target_key, identifier] = positional_args::<3>("assign", args)?;
        Ok(Self {
            cert_id,
            target_key,
            identifier,
        })
    }
}

/// `read(key)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub key: String,
}

impl ReadRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [key] = positional_args::<1>("read", args)?;
        Ok(Self { key })
    }
}

/// `readAssign(certId, expectedTargetKey)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadAssignRequest {
    pub cert_id: String,
    pub expected_target_key: String,
}

impl ReadAssignRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [cert_id, expected_target_key] = positional_args::<2>("readAssign", args)?;
        Ok(Self {
            cert_id,
            expected_target_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::Error;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_requires_fourteen_fields() {
        let thirteen = strings(&["x"; 13]);
        let err = WritePatientRequest::from_args(&thirteen).unwrap_err();
        assert!(matches!(
            err,
            Error::Arity {
                expected: 14,
                actual: 13,
                ..
            }
        ));

        let fourteen = strings(&["x"; 14]);
        assert!(WritePatientRequest::from_args(&fourteen).is_ok());
    }

    #[test]
    fn test_assign_binds_positions() {
        let req = AssignRequest::from_args(&strings(&["cert1", "k1", "id1"])).unwrap();
        assert_eq!(req.cert_id, "cert1");
        assert_eq!(req.target_key, "k1");
        assert_eq!(req.identifier, "id1");
    }

    #[test]
    fn test_read_assign_requires_two_arguments() {
        assert!(ReadAssignRequest::from_args(&strings(&["cert1"])).is_err());
        assert!(ReadAssignRequest::from_args(&strings(&["cert1", "k1", "extra"])).is_err());
    }
}
