//! Persistence of the current rate snapshot.
use crate::core::cache::KeyValueCollection;
use crate::core::snapshot::{RateSnapshot, RateSource};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CACHE_KEY: &str = "nprExchangeRates";
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(60 * 60);

pub struct RateStore {
    collection: Arc<dyn KeyValueCollection>,
    key: String,
    staleness: Duration,
}

impl RateStore {
    pub fn new(collection: Arc<dyn KeyValueCollection>, key: &str, staleness: Duration) -> Self {
        Self {
            collection,
            key: key.to_string(),
            staleness,
        }
    }

    /// Returns the cached snapshot if it is fresh, otherwise the defaults.
    pub async fn load_initial(&self) -> RateSnapshot {
        self.load_initial_at(Utc::now()).await
    }

    pub async fn load_initial_at(&self, now: DateTime<Utc>) -> RateSnapshot {
        self.load_at(now).await.0
    }

    /// Like [`RateStore::load_initial_at`], also reporting where the
    /// snapshot came from.
    pub async fn load_at(&self, now: DateTime<Utc>) -> (RateSnapshot, RateSource) {
        match self.read_cached().await {
            Some(snapshot) if snapshot.is_fresh_at(now, self.staleness) => {
                debug!(fetched_at = %snapshot.fetched_at, "Using cached rates");
                (snapshot, RateSource::Cached)
            }
            Some(snapshot) => {
                debug!(fetched_at = %snapshot.fetched_at, "Cached rates are stale, using defaults");
                (RateSnapshot::defaults_at(now), RateSource::Default)
            }
            None => (RateSnapshot::defaults_at(now), RateSource::Default),
        }
    }

    async fn read_cached(&self) -> Option<RateSnapshot> {
        let raw = match self.collection.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Discarding unreadable rate cache: {:#}", e);
                self.discard().await;
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding malformed rate cache: {}", e);
                self.discard().await;
                None
            }
        }
    }

    async fn discard(&self) {
        if let Err(e) = self.collection.remove(&self.key).await {
            debug!("Could not remove rate cache entry: {:#}", e);
        }
    }

    /// Overwrites the cached snapshot.
    pub async fn persist(&self, snapshot: &RateSnapshot) -> Result<()> {
        let blob = serde_json::to_string(snapshot).context("Failed to serialize rates")?;
        self.collection
            .put(&self.key, blob)
            .await
            .with_context(|| format!("Failed to write rate cache entry: {}", self.key))?;
        debug!(fetched_at = %snapshot.fetched_at, "Persisted rates");
        Ok(())
    }
}
