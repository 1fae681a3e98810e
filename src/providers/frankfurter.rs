use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use super::util::{build_client, get_json, numeric_rates};
use crate::core::provider::RateProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Rates from the Frankfurter API (`/latest?from=NPR`).
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Deserialize, Debug)]
struct FrankfurterResponse {
    base: Option<String>,
    date: Option<String>,
    rates: Option<HashMap<String, Value>>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    fn name(&self) -> &str {
        "frankfurter"
    }

    #[instrument(name = "FrankfurterFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<HashMap<String, f64>> {
        let url = format!("{}/latest?from=NPR", self.base_url);
        let data: FrankfurterResponse = get_json(&self.client, &url).await?;
        debug!(base = ?data.base, date = ?data.date, "Received Frankfurter response");

        data.rates
            .map(numeric_rates)
            .ok_or_else(|| anyhow!("No rates found in response from {}", url))
    }
}
