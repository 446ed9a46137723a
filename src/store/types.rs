use crate::data::Report;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the hosted event store's `health_reports` table.
///
/// Wire representation only - convert to `Report` before anything touches
/// the detection pipeline. Column names follow the store schema, not the
/// domain model (`user_id`/`created_at` vs `subject_id`/`timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Row id assigned by the store; absent on inserts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub user_id: String,

    #[serde(default)]
    pub symptoms: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    pub location: String,

    pub created_at: DateTime<Utc>,
}

impl ReportRow {
    /// Build an insert row from a domain report.
    pub fn from_report(report: &Report) -> Self {
        Self {
            id: None,
            user_id: report.subject_id.clone(),
            symptoms: report.symptoms.clone(),
            temperature: report.temperature,
            location: report.location.clone(),
            created_at: report.timestamp,
        }
    }

    /// Convert into the domain report type.
    pub fn into_report(self) -> Report {
        Report {
            location: self.location,
            timestamp: self.created_at,
            symptoms: self.symptoms,
            subject_id: self.user_id,
            temperature: self.temperature,
        }
    }
}
