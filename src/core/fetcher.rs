//! Sequential fallback over the configured rate providers.
use crate::core::provider::RateProvider;
use crate::core::snapshot::RateSnapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefreshError {
    #[error("a rate refresh is already in progress")]
    InFlight,
    #[error("all {0} rate providers failed")]
    Exhausted(usize),
}

/// Queries providers in priority order and keeps the first usable answer.
pub struct RateFetcher {
    providers: Vec<Box<dyn RateProvider>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the refresh ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RateFetcher {
    pub fn new(providers: Vec<Box<dyn RateProvider>>) -> Self {
        Self {
            providers,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, RefreshError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard(&self.in_flight))
            .map_err(|_| RefreshError::InFlight)
    }

    /// Builds a new snapshot from the first provider that answers with at
    /// least one supported currency.
    ///
    /// Currencies that provider leaves out keep their rate from `current`.
    /// Results from different providers are never merged.
    #[instrument(name = "RateRefresh", skip_all)]
    pub async fn refresh(&self, current: &RateSnapshot) -> Result<RateSnapshot, RefreshError> {
        let _guard = self.begin()?;

        for provider in &self.providers {
            let fetched = match provider.fetch_rates().await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(provider = provider.name(), "Rate provider failed: {:#}", e);
                    continue;
                }
            };

            let (rates, sourced) = current.rates.with_updates(&fetched);
            if sourced.is_empty() {
                warn!(
                    provider = provider.name(),
                    "Rate provider returned none of the supported currencies"
                );
                continue;
            }

            debug!(provider = provider.name(), ?sourced, "Merged provider rates");
            info!(
                provider = provider.name(),
                updated = sourced.len(),
                "Rates refreshed"
            );
            return Ok(RateSnapshot::now(rates));
        }

        Err(RefreshError::Exhausted(self.providers.len()))
    }
}
