use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Builds the HTTP client shared by a provider's requests.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("nprx/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Issues a single GET and parses the JSON body.
///
/// Transport failures, non-success statuses and unparseable bodies are all
/// reported as errors that name the URL.
pub async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    debug!("Requesting rates from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
    }

    let text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response body from {}: {}", url, e))?;
    serde_json::from_str(&text)
        .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", url, e))
}

/// Keeps the entries of a provider's `rates` object that are finite numbers.
pub fn numeric_rates(raw: HashMap<String, Value>) -> HashMap<String, f64> {
    raw.into_iter()
        .filter_map(|(code, value)| match value.as_f64() {
            Some(rate) if rate.is_finite() => Some((code, rate)),
            _ => {
                debug!("Skipping non-numeric rate for {}: {}", code, value);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_numeric_rates_skips_other_values() {
        let raw: HashMap<String, Value> = serde_json::from_value(json!({
            "USD": 0.0076,
            "NPR": 1,
            "XAG": null,
            "XAU": "n/a",
            "BTC": {"rate": 1}
        }))
        .unwrap();

        let rates = numeric_rates(raw);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["USD"], 0.0076);
        assert_eq!(rates["NPR"], 1.0);
    }

    #[tokio::test]
    async fn test_body_errors_name_the_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2"))
            .mount(&mock_server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/latest", mock_server.uri());
        let err = get_json::<Value>(&client, &url).await.unwrap_err();
        assert!(err.to_string().contains(&url));
    }
}
