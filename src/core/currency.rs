//! Supported currencies and the NPR rate map.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Currencies that NPR amounts are converted into, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Currency {
    Usd,
    Inr,
    Eur,
    Gbp,
    Aud,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Inr,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aud,
        Currency::Jpy,
    ];

    /// ISO 4217 code, also the key used by rate providers.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
        }
    }

    /// Returns display name and flag for the currency
    pub fn display_info(&self) -> (&'static str, &'static str) {
        match self {
            Currency::Usd => ("US Dollar", "🇺🇸"),
            Currency::Inr => ("Indian Rupee", "🇮🇳"),
            Currency::Eur => ("Euro", "🇪🇺"),
            Currency::Gbp => ("British Pound", "🇬🇧"),
            Currency::Aud => ("Australian Dollar", "🇦🇺"),
            Currency::Jpy => ("Japanese Yen", "🇯🇵"),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateMapError {
    #[error("missing rate for {0}")]
    Missing(Currency),
    #[error("rate for {0} must be a positive number, got {1}")]
    NonPositive(Currency, f64),
}

/// Units of each supported currency per 1 NPR.
///
/// Every currency in [`Currency::ALL`] always has a finite, positive rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct RateMap([f64; 6]);

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

impl RateMap {
    /// Baseline rates used until a provider or the cache supplies better ones.
    pub const DEFAULT: RateMap = RateMap([0.0075, 0.62, 0.0069, 0.0059, 0.0114, 1.12]);

    /// Builds a map by asking `rate_for` for every supported currency.
    pub fn try_from_fn(
        mut rate_for: impl FnMut(Currency) -> Option<f64>,
    ) -> Result<Self, RateMapError> {
        let mut rates = [0.0; 6];
        for currency in Currency::ALL {
            let rate = rate_for(currency).ok_or(RateMapError::Missing(currency))?;
            if !is_valid_rate(rate) {
                return Err(RateMapError::NonPositive(currency, rate));
            }
            rates[currency.index()] = rate;
        }
        Ok(Self(rates))
    }

    pub fn get(&self, currency: Currency) -> f64 {
        self.0[currency.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        Currency::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Overlays provider rates keyed by currency code onto this map.
    ///
    /// Currencies the provider omits, or reports as zero, negative or
    /// non-finite, keep their current rate. Returns the new map and the
    /// currencies that were taken from `updates`.
    pub fn with_updates(&self, updates: &HashMap<String, f64>) -> (RateMap, Vec<Currency>) {
        let mut rates = self.0;
        let mut sourced = Vec::new();
        for currency in Currency::ALL {
            if let Some(&rate) = updates.get(currency.code()) {
                if is_valid_rate(rate) {
                    rates[currency.index()] = rate;
                    sourced.push(currency);
                }
            }
        }
        (RateMap(rates), sourced)
    }
}

impl Default for RateMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<BTreeMap<String, f64>> for RateMap {
    type Error = RateMapError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        RateMap::try_from_fn(|currency| map.get(currency.code()).copied())
    }
}

impl From<RateMap> for BTreeMap<String, f64> {
    fn from(rates: RateMap) -> Self {
        rates
            .iter()
            .map(|(currency, rate)| (currency.code().to_string(), rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_str() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" JPY ".parse::<Currency>().unwrap(), Currency::Jpy);
        let err = "CHF".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency: CHF");
    }

    #[test]
    fn test_default_rates() {
        let rates = RateMap::default();
        assert_eq!(rates.get(Currency::Usd), 0.0075);
        assert_eq!(rates.get(Currency::Inr), 0.62);
        assert_eq!(rates.get(Currency::Eur), 0.0069);
        assert_eq!(rates.get(Currency::Gbp), 0.0059);
        assert_eq!(rates.get(Currency::Aud), 0.0114);
        assert_eq!(rates.get(Currency::Jpy), 1.12);
        assert_eq!(rates.iter().count(), 6);
    }

    #[test]
    fn test_rate_map_requires_every_currency() {
        let mut map: BTreeMap<String, f64> = RateMap::default().into();
        map.remove("GBP");
        assert_eq!(
            RateMap::try_from(map),
            Err(RateMapError::Missing(Currency::Gbp))
        );
    }

    #[test]
    fn test_rate_map_rejects_non_positive_rates() {
        let mut map: BTreeMap<String, f64> = RateMap::default().into();
        map.insert("AUD".to_string(), 0.0);
        assert_eq!(
            RateMap::try_from(map),
            Err(RateMapError::NonPositive(Currency::Aud, 0.0))
        );
    }

    #[test]
    fn test_rate_map_json_shape() {
        let json = serde_json::to_value(RateMap::default()).unwrap();
        assert_eq!(json["USD"], 0.0075);
        assert_eq!(json["JPY"], 1.12);

        let parsed: RateMap = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, RateMap::default());

        let invalid = r#"{"USD": 0.0075, "INR": -1.0}"#;
        assert!(serde_json::from_str::<RateMap>(invalid).is_err());
    }

    #[test]
    fn test_with_updates_keeps_missing_and_invalid_rates() {
        let current = RateMap::default();
        let updates = HashMap::from([
            ("USD".to_string(), 0.0072),
            ("EUR".to_string(), 0.0064),
            ("GBP".to_string(), 0.0),
            ("CHF".to_string(), 0.0065),
        ]);

        let (rates, sourced) = current.with_updates(&updates);
        assert_eq!(sourced, vec![Currency::Usd, Currency::Eur]);
        assert_eq!(rates.get(Currency::Usd), 0.0072);
        assert_eq!(rates.get(Currency::Eur), 0.0064);
        assert_eq!(rates.get(Currency::Gbp), current.get(Currency::Gbp));
        assert_eq!(rates.get(Currency::Jpy), current.get(Currency::Jpy));
    }
}
