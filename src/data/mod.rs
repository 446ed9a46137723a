pub mod types;

pub use types::{
    AlertDebug, OutbreakAlert, Report, ReportValidationError, Severity,
};
