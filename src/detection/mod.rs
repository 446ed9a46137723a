pub mod aggregate;
pub mod engine;
pub mod scoring;
pub mod windows;

pub use aggregate::{BaselineDailyCounts, CurrentAggregate};
pub use engine::{compute_alerts, DetectionConfig, OutbreakDetector, TOP_SYMPTOM_LIMIT};
pub use scoring::{
    risk_score, score_location, severity_for, LocationScore, OUTBREAK_Z_THRESHOLD,
};
pub use windows::{DetectionWindows, TimeWindow};
