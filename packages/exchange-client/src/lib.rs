//! exchangerate.host conversion client.
//!
//! One endpoint: convert an amount between two currencies. The API signals
//! failures through a `success` flag as well as HTTP status, so both are
//! checked.

pub mod error;

pub use error::{ExchangeError, Result};

use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.exchangerate.host";

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    success: bool,
    result: Option<f64>,
}

pub struct ExchangeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExchangeClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("reqwest client");

        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the API host (used by tests against a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Convert `amount` from one currency code to another at the current rate.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let resp = self
            .client
            .get(format!("{}/convert", self.base_url))
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("from", from),
                ("to", to),
                ("amount", &amount.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let converted: ConvertResponse = resp
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(e.to_string()))?;

        match (converted.success, converted.result) {
            (true, Some(result)) => Ok(result),
            _ => {
                tracing::warn!(from, to, amount, "Rate service reported failure");
                Err(ExchangeError::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn convert_passes_query_params_and_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .and(query_param("access_key", "key"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .and(query_param("amount", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "result": 92.4
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ExchangeClient::new("key".into()).with_base_url(server.uri());
        let result = client.convert(100.0, "USD", "EUR").await.expect("convert");
        assert!((result - 92.4).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn success_false_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": { "code": 105 }
            })))
            .mount(&server)
            .await;

        let client = ExchangeClient::new("key".into()).with_base_url(server.uri());
        let err = client.convert(1.0, "USD", "EUR").await.unwrap_err();
        assert!(matches!(err, ExchangeError::Unavailable));
    }
}
