use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use super::util::{build_client, get_json, numeric_rates};
use crate::core::provider::RateProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Rates from ExchangeRate-API's open endpoint (`/v4/latest/NPR`).
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Deserialize, Debug)]
struct ExchangeRateApiResponse {
    base: Option<String>,
    time_last_updated: Option<i64>,
    rates: Option<HashMap<String, Value>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    #[instrument(name = "ExchangeRateApiFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<HashMap<String, f64>> {
        let url = format!("{}/v4/latest/NPR", self.base_url);
        let data: ExchangeRateApiResponse = get_json(&self.client, &url).await?;
        debug!(
            base = ?data.base,
            time_last_updated = ?data.time_last_updated,
            "Received ExchangeRate-API response"
        );

        data.rates
            .map(numeric_rates)
            .ok_or_else(|| anyhow!("No rates found in response from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "provider": "https://www.exchangerate-api.com",
            "base": "NPR",
            "date": "2024-05-17",
            "time_last_updated": 1715904001,
            "rates": {"NPR": 1, "USD": 0.0075, "INR": 0.625, "GBP": 0.00591}
        }"#;

        Mock::given(method("GET"))
            .and(path("/v4/latest/NPR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let rates = provider.fetch_rates().await.unwrap();
        assert_eq!(rates["NPR"], 1.0);
        assert_eq!(rates["INR"], 0.625);
        assert_eq!(rates["GBP"], 0.00591);
    }

    #[tokio::test]
    async fn test_non_numeric_entries_are_skipped() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "base": "NPR",
            "rates": {"USD": 0.0076, "XAG": null, "XDR": "unavailable"}
        }"#;

        Mock::given(method("GET"))
            .and(path("/v4/latest/NPR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let rates = provider.fetch_rates().await.unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates["USD"], 0.0076);
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/NPR"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let result = provider.fetch_rates().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            format!(
                "HTTP error: 500 Internal Server Error for URL: {}/v4/latest/NPR",
                mock_server.uri()
            )
        );
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/NPR"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rates": {"USD": 0.0075}}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), Duration::from_millis(50)).unwrap();
        let result = provider.fetch_rates().await;
        assert!(result.unwrap_err().to_string().starts_with("Request error:"));
    }
}
