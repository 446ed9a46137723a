pub mod memory;
pub mod rest;
pub mod types;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use types::ReportRow;

use crate::data::Report;
use chrono::{DateTime, Utc};
use std::future::Future;
use thiserror::Error;

/// Errors surfaced by a report store.
///
/// The engine propagates these unmodified - retries, if any, belong to the
/// store backend or the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-2xx response from the store API.
    #[error("store returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, timeout, or other transport-level failure.
    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store response body could not be deserialized.
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured store endpoint is not a valid URL.
    #[error("invalid store endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// The event store the detection engine reads from.
///
/// Two operations only: durably record one report, and return every report
/// in a half-open time range `start <= timestamp < end`. No ordering
/// guarantee on reads.
pub trait ReportStore: Send + Sync {
    /// Durably record one report.
    fn append(
        &self,
        report: Report,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All reports with `start <= timestamp < end`, in no guaranteed order.
    fn read_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Report>, StoreError>> + Send;
}
