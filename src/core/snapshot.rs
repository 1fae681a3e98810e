use crate::core::currency::RateMap;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A full set of rates and the time they were obtained.
///
/// Serialized as `{"rates": {...}, "lastUpdated": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub rates: RateMap,
    #[serde(rename = "lastUpdated", with = "chrono::serde::ts_milliseconds")]
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(rates: RateMap, fetched_at: DateTime<Utc>) -> Self {
        // Millisecond precision, same as the persisted form.
        Self {
            rates,
            fetched_at: fetched_at.trunc_subsecs(3),
        }
    }

    pub fn now(rates: RateMap) -> Self {
        Self::new(rates, Utc::now())
    }

    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self::new(RateMap::default(), now)
    }

    /// True while `now - fetched_at` is below `max_age`. Timestamps in the
    /// future count as fresh.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < max_age,
            Err(_) => true,
        }
    }
}

/// Where the snapshot currently shown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Default,
    Cached,
    Fetched,
}

impl RateSource {
    pub fn label(&self) -> &'static str {
        match self {
            RateSource::Default => "default",
            RateSource::Cached => "cached",
            RateSource::Fetched => "live",
        }
    }
}
