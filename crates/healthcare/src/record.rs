//! Patient record encoding
//!
//! A record is built from a [`WritePatientRequest`] and stored as a JSON
//! object. The report type decides which of the two measurement groups is
//! filled in; the other group is left empty.

use ledger_common::Result;
use serde::{Deserialize, Serialize};

use crate::requests::WritePatientRequest;

/// Report type discriminator, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Pre/post-lunch glucose readings
    Diabetes,
    /// Minimum/maximum kidney size
    Kidney,
    /// Anything else; no measurement group is recorded
    Unspecified,
}

impl ReportType {
    pub fn classify(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "diabetes" => ReportType::Diabetes,
            "kidney" => ReportType::Kidney,
            _ => ReportType::Unspecified,
        }
    }
}

/// Stored patient record
///
/// Field names are serialized in PascalCase to stay readable alongside records
/// already on the ledger. `Titanus` is the historical key for tetanus status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatientRecord {
    pub username: String,
    pub name: String,
    pub description_of_current_ailment: String,
    pub date_of_birth: String,
    pub gender: String,
    pub report_type: String,
    pub pre_lunch: String,
    pub post_lunch: String,
    pub min_size: String,
    pub max_size: String,
    pub disease: String,
    pub on_going_medication: String,
    pub duration: String,
    #[serde(rename = "Titanus")]
    pub tetanus: String,
    pub hepatitis_a: String,
    pub hepatitis_b: String,
}

impl PatientRecord {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl From<WritePatientRequest> for PatientRecord {
    fn from(req: WritePatientRequest) -> Self {
        let mut record = PatientRecord {
            username: req.username,
            name: req.name,
            description_of_current_ailment: req.ailment,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            ..Default::default()
        };

        // Diabetes reports carry their label one slot later and reuse the
        // disease slot as the post-lunch reading.
        match ReportType::classify(&req.report_type) {
            ReportType::Diabetes => {
                record.report_type = req.detail_a;
                record.pre_lunch = req.detail_b;
                record.post_lunch = req.disease.clone();
            }
            ReportType::Kidney => {
                record.report_type = req.report_type;
                record.min_size = req.detail_a;
                record.max_size = req.detail_b;
            }
            ReportType::Unspecified => {}
        }

        record.disease = req.disease;
        record.on_going_medication = req.on_going_medication;
        record.duration = req.duration;
        record.tetanus = req.tetanus;
        record.hepatitis_a = req.hepatitis_a;
        record.hepatitis_b = req.hepatitis_b;
        record
    }
}
