//! Remote exchange-rate source abstraction

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches the provider's NPR based rates keyed by currency code.
    ///
    /// May contain currencies that are not supported and miss some that are.
    async fn fetch_rates(&self) -> Result<HashMap<String, f64>>;
}
