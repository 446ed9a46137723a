pub mod data;
pub mod detection;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use data::{AlertDebug, OutbreakAlert, Report, ReportValidationError, Severity};
pub use detection::{
    compute_alerts, DetectionConfig, DetectionWindows, OutbreakDetector, TimeWindow,
};
pub use store::{MemoryStore, ReportStore, RestStore, StoreError};
pub use utils::Config;
