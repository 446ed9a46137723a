use crate::data::Report;
use crate::store::types::ReportRow;
use crate::store::{ReportStore, StoreError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request timeout for store calls. A detection run blocks on two reads,
/// so a hung store must fail fast rather than stall the whole run.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for a PostgREST-style event store.
///
/// The store exposes the reports table at `rest/v1/{table}`; appends are
/// plain inserts and range reads are column filters on `created_at`.
/// Authentication is a static service key sent on every request.
pub struct RestStore {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl RestStore {
    /// Create a store client for `table` hosted at `base_url`.
    pub fn new(base_url: &str, api_key: String, table: &str) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)?;
        let endpoint = base.join(&format!("rest/v1/{}", table))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

impl ReportStore for RestStore {
    async fn append(&self, report: Report) -> Result<(), StoreError> {
        let row = ReportRow::from_report(&report);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!(location = %report.location, "report appended to store");
        Ok(())
    }

    async fn read_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Report>, StoreError> {
        // PostgREST stacks repeated column filters as AND:
        //   ?created_at=gte.{start}&created_at=lt.{end}
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("select", "*".to_string()),
                ("created_at", format!("gte.{}", start.to_rfc3339())),
                ("created_at", format!("lt.{}", end.to_rfc3339())),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let rows: Vec<ReportRow> = serde_json::from_str(&body)?;

        debug!(count = rows.len(), "reports read from store");
        Ok(rows.into_iter().map(ReportRow::into_report).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_read_range_parses_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/health_reports")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("created_at".into(), "gte.2026-02-01T00:00:00+00:00".into()),
                Matcher::UrlEncoded("created_at".into(), "lt.2026-02-02T00:00:00+00:00".into()),
            ]))
            .match_header("apikey", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 1, "user_id": "u1", "symptoms": ["fever"],
                     "location": "Hostel A", "created_at": "2026-02-01T10:00:00Z"},
                    {"id": 2, "user_id": "u2", "symptoms": [],
                     "location": "Hostel B", "created_at": "2026-02-01T11:00:00Z"}
                ]"#,
            )
            .create_async()
            .await;

        let store =
            RestStore::new(&server.url(), "test-key".to_string(), "health_reports").unwrap();
        let (start, end) = window();
        let reports = store.read_range(start, end).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].location, "Hostel A");
        assert_eq!(reports[0].subject_id, "u1");
        assert!(reports[1].symptoms.is_empty());
    }

    #[tokio::test]
    async fn test_append_posts_insert_row() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/health_reports")
            .match_header("Prefer", "return=minimal")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "user_id": "u1",
                "location": "Hostel A",
            })))
            .with_status(201)
            .create_async()
            .await;

        let store =
            RestStore::new(&server.url(), "test-key".to_string(), "health_reports").unwrap();
        let report = Report {
            location: "Hostel A".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap(),
            symptoms: vec!["fever".to_string()],
            subject_id: "u1".to_string(),
            temperature: Some(38.2),
        };

        store.append(report).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/health_reports")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("service unavailable")
            .create_async()
            .await;

        let store =
            RestStore::new(&server.url(), "test-key".to_string(), "health_reports").unwrap();
        let (start, end) = window();
        let err = store.read_range(start, end).await.unwrap_err();

        match err {
            StoreError::Http { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("unavailable"));
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/health_reports")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let store =
            RestStore::new(&server.url(), "test-key".to_string(), "health_reports").unwrap();
        let (start, end) = window();
        let err = store.read_range(start, end).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let result = RestStore::new("not a url", "key".to_string(), "health_reports");
        assert!(matches!(result, Err(StoreError::InvalidEndpoint(_))));
    }
}
