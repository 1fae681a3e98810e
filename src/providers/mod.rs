pub mod exchangerate_api;
pub mod frankfurter;
pub mod util;

use crate::core::config::{ProviderConfig, ProviderKind};
use crate::core::provider::RateProvider;
use anyhow::Result;
use std::time::Duration;

/// Instantiates the configured providers, preserving their order.
pub fn build_providers(
    configs: &[ProviderConfig],
    timeout: Duration,
) -> Result<Vec<Box<dyn RateProvider>>> {
    configs
        .iter()
        .map(|config| -> Result<Box<dyn RateProvider>> {
            let base_url = config.base_url();
            let provider: Box<dyn RateProvider> = match config.kind {
                ProviderKind::Frankfurter => {
                    Box::new(frankfurter::FrankfurterProvider::new(base_url, timeout)?)
                }
                ProviderKind::ExchangerateApi => Box::new(
                    exchangerate_api::ExchangeRateApiProvider::new(base_url, timeout)?,
                ),
            };
            Ok(provider)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;

    #[test]
    fn test_build_providers_keeps_order() {
        let config = AppConfig::default();
        let providers = build_providers(&config.providers, config.request_timeout()).unwrap();
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["frankfurter", "exchangerate-api"]);
    }
}
