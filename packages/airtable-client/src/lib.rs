//! Airtable REST API client for the business directory table.
//!
//! The remote store owns canonical state; this client only reads filtered
//! views and performs single-shot writes. Reads get one bounded retry on
//! transient failures; writes are never retried (no idempotency keys).
//!
//! # Example
//!
//! ```rust,ignore
//! use airtable_client::{AirtableClient, NewBusiness};
//!
//! let client = AirtableClient::new(token, base_id, table);
//!
//! let id = client.create(&NewBusiness { /* ... */ }).await?;
//! client.set_status(&id, true, false).await?;
//! for business in client.list_approved().await? {
//!     println!("{} ({})", business.name, business.city);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{AirtableError, Result};
pub use types::{BusinessRecord, NewBusiness};

use std::time::Duration;
use types::{CreatedRecord, FieldsEnvelope, RecordFields, RecordsResponse};

const BASE_URL: &str = "https://api.airtable.com/v0";

/// Formula selecting records the moderator has approved.
const FILTER_APPROVED: &str = "{Проверено}=TRUE()";

/// Formula selecting records still awaiting review.
const FILTER_PENDING: &str = "NOT({Проверено})";

pub struct AirtableClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    base_id: String,
    table: String,
}

impl AirtableClient {
    pub fn new(token: String, base_id: String, table: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("reqwest client");

        Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
            base_id,
            table,
        }
    }

    /// Override the API host (used by tests against a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.base_id, self.table)
    }

    /// Fetch all approved records, in store order.
    pub async fn list_approved(&self) -> Result<Vec<BusinessRecord>> {
        self.list_filtered(FILTER_APPROVED).await
    }

    /// Fetch all records awaiting moderation, in store order.
    pub async fn list_pending(&self) -> Result<Vec<BusinessRecord>> {
        self.list_filtered(FILTER_PENDING).await
    }

    async fn list_filtered(&self, formula: &str) -> Result<Vec<BusinessRecord>> {
        match self.fetch_records(formula).await {
            Ok(records) => Ok(records),
            // One bounded retry for reads; transient network blips and 5xx only.
            Err(e) if Self::is_transient(&e) => {
                tracing::warn!(error = %e, "Airtable read failed, retrying once");
                self.fetch_records(formula).await
            }
            Err(e) => Err(e),
        }
    }

    fn is_transient(error: &AirtableError) -> bool {
        match error {
            AirtableError::Network(_) => true,
            AirtableError::Api { status, .. } => *status >= 500,
            AirtableError::Parse(_) => false,
        }
    }

    async fn fetch_records(&self, formula: &str) -> Result<Vec<BusinessRecord>> {
        let resp = self
            .client
            .get(self.table_url())
            .bearer_auth(&self.token)
            .query(&[("filterByFormula", formula)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let records: RecordsResponse = resp
            .json()
            .await
            .map_err(|e| AirtableError::Parse(e.to_string()))?;

        Ok(records
            .records
            .into_iter()
            .map(|r| r.into_business())
            .collect())
    }

    /// Create a new record with `verified=false`, `rejected=false`.
    /// Returns the store-assigned record id.
    pub async fn create(&self, business: &NewBusiness) -> Result<String> {
        let envelope = FieldsEnvelope::from(business);

        let resp = self
            .client
            .post(self.table_url())
            .bearer_auth(&self.token)
            .json(&envelope)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedRecord = resp
            .json()
            .await
            .map_err(|e| AirtableError::Parse(e.to_string()))?;

        tracing::info!(record_id = %created.id, "Created directory record");
        Ok(created.id)
    }

    /// Patch the two status flags on an existing record. Last write wins.
    pub async fn set_status(&self, record_id: &str, verified: bool, rejected: bool) -> Result<()> {
        let envelope = FieldsEnvelope {
            fields: RecordFields {
                verified: Some(verified),
                rejected: Some(rejected),
                ..Default::default()
            },
        };

        let url = format!("{}/{}", self.table_url(), record_id);
        let resp = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&envelope)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(record_id, verified, rejected, "Updated record status");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AirtableClient {
        AirtableClient::new("tok".into(), "appBase".into(), "Offers".into())
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn list_approved_filters_on_verified_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appBase/Offers"))
            .and(query_param("filterByFormula", "{Проверено}=TRUE()"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [{
                    "id": "rec1",
                    "fields": {
                        "Название": "Cafe A",
                        "Город": "Kyiv",
                        "Услуги": "10% discount",
                        "Контакт": "@cafeA",
                        "Проверено": true,
                        "User_id": "7"
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records = client(&server).list_approved().await.expect("list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Cafe A");
        assert!(records[0].verified);
        assert_eq!(records[0].submitter_id, 7);
    }

    #[tokio::test]
    async fn list_pending_uses_not_formula() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appBase/Offers"))
            .and(query_param("filterByFormula", "NOT({Проверено})"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "records": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let records = client(&server).list_pending().await.expect("list");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn read_retries_once_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appBase/Offers"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/appBase/Offers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "records": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let records = client(&server).list_approved().await.expect("retried read");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn create_posts_fields_and_returns_record_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/appBase/Offers"))
            .and(header("authorization", "Bearer tok"))
            .and(body_partial_json(serde_json::json!({
                "fields": {
                    "Название": "Cafe A",
                    "Проверено": false,
                    "Отклонено": false,
                    "User_id": "7"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "recNew" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let id = client(&server)
            .create(&NewBusiness {
                name: "Cafe A".into(),
                city: "Kyiv".into(),
                services: "10% discount".into(),
                contact: "@cafeA".into(),
                submitter_id: 7,
            })
            .await
            .expect("create");
        assert_eq!(id, "recNew");
    }

    #[tokio::test]
    async fn create_surfaces_store_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/appBase/Offers"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string(r#"{"error":"INVALID_VALUE"}"#),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .create(&NewBusiness {
                name: "x".into(),
                city: "y".into(),
                services: "z".into(),
                contact: "c".into(),
                submitter_id: 1,
            })
            .await
            .unwrap_err();

        match err {
            AirtableError::Api { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("INVALID_VALUE"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_status_patches_only_flags() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/appBase/Offers/rec1"))
            .and(body_partial_json(serde_json::json!({
                "fields": { "Проверено": false, "Отклонено": true }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "rec1",
                "fields": { "Проверено": false, "Отклонено": true }
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .set_status("rec1", false, true)
            .await
            .expect("patch");
    }
}
