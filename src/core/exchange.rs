//! The converter's state: current snapshot, amount and auto-refresh toggle.
use crate::core::amount::Amount;
use crate::core::conversion::{self, Conversion, SpreadQuote};
use crate::core::currency::Currency;
use crate::core::fetcher::{RateFetcher, RefreshError};
use crate::core::rate_store::RateStore;
use crate::core::snapshot::{RateSnapshot, RateSource};
use chrono::Utc;
use tracing::{debug, warn};

pub struct Exchange {
    store: RateStore,
    fetcher: RateFetcher,
    snapshot: RateSnapshot,
    source: RateSource,
    amount: Amount,
    auto_refresh: bool,
}

impl Exchange {
    /// Starts from the cached snapshot when it is fresh, else from defaults.
    pub async fn new(
        store: RateStore,
        fetcher: RateFetcher,
        amount: Amount,
        auto_refresh: bool,
    ) -> Self {
        let (snapshot, source) = store.load_at(Utc::now()).await;
        debug!(source = source.label(), "Initial rates loaded");
        Self {
            store,
            fetcher,
            snapshot,
            source,
            amount,
            auto_refresh,
        }
    }

    pub fn snapshot(&self) -> &RateSnapshot {
        &self.snapshot
    }

    pub fn source(&self) -> RateSource {
        self.source
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Flips auto-refresh and returns the new state.
    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.auto_refresh = !self.auto_refresh;
        debug!(auto_refresh = self.auto_refresh, "Toggled auto-refresh");
        self.auto_refresh
    }

    /// Replaces the snapshot with fresh rates and caches them.
    ///
    /// On failure the current snapshot stays in place. A failure to write
    /// the cache is logged only.
    pub async fn refresh(&mut self) -> Result<&RateSnapshot, RefreshError> {
        let fresh = self.fetcher.refresh(&self.snapshot).await?;
        if let Err(e) = self.store.persist(&fresh).await {
            warn!("Could not cache refreshed rates: {:#}", e);
        }
        self.snapshot = fresh;
        self.source = RateSource::Fetched;
        Ok(&self.snapshot)
    }

    /// Periodic timer hook: refreshes only while auto-refresh is on.
    pub async fn on_timer_tick(&mut self) -> Option<Result<&RateSnapshot, RefreshError>> {
        if !self.auto_refresh {
            debug!("Auto-refresh disabled, skipping tick");
            return None;
        }
        Some(self.refresh().await)
    }

    pub fn conversions(&self) -> Vec<Conversion> {
        conversion::conversions(self.amount, &self.snapshot.rates)
    }

    pub fn rate_table(&self) -> Vec<SpreadQuote> {
        conversion::rate_table(&self.snapshot.rates)
    }

    pub fn reverse_rate(&self, currency: Currency) -> f64 {
        conversion::reverse_rate(self.snapshot.rates.get(currency))
    }
}
