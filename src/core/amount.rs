use crate::core::conversion::format_number;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

/// A whole NPR amount, always within [`Amount::MIN`, `Amount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Amount(u32);

impl Amount {
    pub const MIN: i64 = 100;
    pub const MAX: i64 = 1_000_000;

    /// Clamps `value` into the supported range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX) as u32)
    }

    /// Parses free-form user input the way a numeric field would.
    ///
    /// A leading integer is taken and anything after it ignored. Input with
    /// no leading integer falls back to the minimum amount.
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Self::new(Self::MIN);
        }

        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self(1000)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        i64::from(amount.0)
    }
}

impl FromStr for Amount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::new)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_number(u64::from(self.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_clamped() {
        assert_eq!(Amount::new(5).value(), 100);
        assert_eq!(Amount::new(-20).value(), 100);
        assert_eq!(Amount::new(2500).value(), 2500);
        assert_eq!(Amount::new(5_000_000).value(), 1_000_000);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Amount::parse_lenient("2500").value(), 2500);
        assert_eq!(Amount::parse_lenient("  750 rupees").value(), 750);
        assert_eq!(Amount::parse_lenient("abc").value(), 100);
        assert_eq!(Amount::parse_lenient("").value(), 100);
        assert_eq!(Amount::parse_lenient("0").value(), 100);
        assert_eq!(Amount::parse_lenient("-300").value(), 100);
        assert_eq!(Amount::parse_lenient("99999999999999999999999").value(), 1_000_000);
    }

    #[test]
    fn test_from_str_clamps() {
        assert_eq!("250000".parse::<Amount>().unwrap().value(), 250_000);
        assert_eq!("12".parse::<Amount>().unwrap().value(), 100);
        assert!("twelve".parse::<Amount>().is_err());
    }

    #[test]
    fn test_display_uses_thousands_separator() {
        assert_eq!(Amount::new(1000).to_string(), "1,000");
        assert_eq!(Amount::new(1_000_000).to_string(), "1,000,000");
        assert_eq!(Amount::new(250).to_string(), "250");
    }

    #[test]
    fn test_deserialize_clamps() {
        let amount: Amount = serde_yaml::from_str("50").unwrap();
        assert_eq!(amount.value(), 100);
        assert_eq!(Amount::default().value(), 1000);
    }
}
