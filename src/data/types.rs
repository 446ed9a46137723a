use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plausible body temperature range for a submitted report, in Celsius.
pub const MIN_TEMPERATURE_C: f64 = 35.0;
pub const MAX_TEMPERATURE_C: f64 = 43.0;

/// A single symptom report tied to a location.
///
/// Reports are owned by the event store; the detection engine only ever
/// reads them back in time-bounded batches. `symptoms` may be empty and
/// `subject_id` is not unique across reports - one subject may submit
/// several reports in the same window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub subject_id: String,
    /// Body temperature in Celsius, if the subject measured one.
    /// Carried for the submission schema; the engine ignores it.
    pub temperature: Option<f64>,
}

impl Report {
    /// Validate a report before it is appended to the store.
    ///
    /// Detection never validates - a report that made it into the store is
    /// trusted. This runs at the submission boundary only.
    pub fn validate(&self) -> Result<(), ReportValidationError> {
        if self.location.trim().is_empty() {
            return Err(ReportValidationError::EmptyLocation);
        }
        if let Some(temp) = self.temperature {
            if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&temp) {
                return Err(ReportValidationError::TemperatureOutOfRange(temp));
            }
        }
        Ok(())
    }
}

/// Rejection reasons for a submitted report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportValidationError {
    #[error("location must not be empty")]
    EmptyLocation,

    #[error("temperature {0}C outside plausible range {MIN_TEMPERATURE_C}-{MAX_TEMPERATURE_C}C")]
    TemperatureOutOfRange(f64),
}

/// Alert severity tiers, in ascending order.
///
/// Derived from z-score bands: Low (2.0, 2.5], Medium (2.5, 3.5],
/// High (3.5, inf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Raw intermediate statistics behind an alert, for audit and inspection.
///
/// All floats are rounded to two decimals. Never used for scoring decisions;
/// omitted from the serialized alert when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDebug {
    pub baseline_mean: f64,
    pub baseline_std_dev: f64,
    pub current_count: u32,
    pub z_score: f64,
}

/// An outbreak alert for a single location.
///
/// Produced by one detection run and returned to the caller; never persisted.
/// Every alert satisfies `z_score > 2.0` at the time of detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutbreakAlert {
    pub location: String,

    /// Count of distinct subjects reporting in the current window.
    pub affected_subjects: u32,

    /// Capped linear rescaling of the z-score into [0, 100], one decimal.
    pub risk_score: f64,

    pub severity: Severity,

    /// Up to three most frequent symptoms in the current window,
    /// most frequent first, ties in first-seen order.
    pub top_symptoms: Vec<String>,

    /// The `now` instant of the detection run; identical for every alert
    /// produced by one call.
    pub detection_time: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<AlertDebug>,
}
