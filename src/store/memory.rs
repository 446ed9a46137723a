use crate::data::Report;
use crate::store::{ReportStore, StoreError};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// In-process report store.
///
/// Backs unit tests and the simulator; appends and range reads share one
/// lock, which is fine at the volumes those callers generate. Not durable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored reports.
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

impl ReportStore for MemoryStore {
    async fn append(&self, report: Report) -> Result<(), StoreError> {
        self.reports.write().await.push(report);
        Ok(())
    }

    async fn read_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.read().await;
        Ok(reports
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .cloned()
            .collect())
    }
}
