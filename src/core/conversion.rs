//! Conversion formulas and number formatting for the rate views.
use crate::core::amount::Amount;
use crate::core::currency::{Currency, RateMap};

/// Synthetic spread applied on either side of the mid rate. Display only.
pub const SPREAD: f64 = 0.01;

/// Converts an NPR amount using a "currency per NPR" rate.
pub fn convert(amount: Amount, rate: f64) -> f64 {
    f64::from(amount.value()) * rate
}

/// Returns the simulated `(buy, sell)` rates around `rate`.
pub fn buy_sell(rate: f64) -> (f64, f64) {
    (rate * (1.0 - SPREAD), rate * (1.0 + SPREAD))
}

/// NPR per one unit of the currency.
pub fn reverse_rate(rate: f64) -> f64 {
    1.0 / rate
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats with two decimals and thousands separators, e.g. `280,000.00`.
pub fn format_money(value: f64) -> String {
    let text = format!("{value:.2}");
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_thousands(whole)),
        None => format!("{sign}{}", group_thousands(unsigned)),
    }
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.4}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub currency: Currency,
    pub rate: f64,
    pub converted: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadQuote {
    pub currency: Currency,
    pub buy: f64,
    pub sell: f64,
}

pub fn conversions(amount: Amount, rates: &RateMap) -> Vec<Conversion> {
    rates
        .iter()
        .map(|(currency, rate)| Conversion {
            currency,
            rate,
            converted: convert(amount, rate),
        })
        .collect()
}

pub fn rate_table(rates: &RateMap) -> Vec<SpreadQuote> {
    rates
        .iter()
        .map(|(currency, rate)| {
            let (buy, sell) = buy_sell(rate);
            SpreadQuote {
                currency,
                buy,
                sell,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_scenarios() {
        let usd = convert(Amount::new(1000), 0.0075);
        assert!((usd - 7.5).abs() < 1e-9);
        assert_eq!(format_money(usd), "7.50");

        let jpy = convert(Amount::new(250_000), 1.12);
        assert!((jpy - 280_000.0).abs() < 1e-6);
        assert_eq!(format_money(jpy), "280,000.00");
    }

    #[test]
    fn test_convert_across_amount_range() {
        for value in [100, 999, 1000, 54_321, 1_000_000] {
            let amount = Amount::new(value);
            for rate in [0.0059, 0.62, 1.12] {
                let expected = value as f64 * rate;
                assert!((convert(amount, rate) - expected).abs() < 1e-9);

                let text = format_money(convert(amount, rate));
                let (_, fraction) = text.split_once('.').unwrap();
                assert_eq!(fraction.len(), 2);
            }
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(1_234_567.891), "1,234,567.89");
        assert_eq!(format_money(-4321.5), "-4,321.50");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100), "100");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123_456), "123,456");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_buy_sell_brackets_rate() {
        for rate in [0.0059, 0.0075, 0.62, 1.12, 250.0] {
            let (buy, sell) = buy_sell(rate);
            assert!(buy < rate && rate < sell);
            assert!((buy - rate * 0.99).abs() < 1e-12);
            assert!((sell - rate * 1.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reverse_rate_is_inverse() {
        for (_, rate) in RateMap::default().iter() {
            assert!((reverse_rate(rate) * rate - 1.0).abs() < 1e-12);
        }
        assert_eq!(format_rate(reverse_rate(0.0075)), "133.3333");
    }

    #[test]
    fn test_conversion_rows_follow_currency_order() {
        let rows = conversions(Amount::new(1000), &RateMap::default());
        let codes: Vec<_> = rows.iter().map(|r| r.currency.code()).collect();
        assert_eq!(codes, ["USD", "INR", "EUR", "GBP", "AUD", "JPY"]);
        assert!((rows[1].converted - 620.0).abs() < 1e-9);

        let quotes = rate_table(&RateMap::default());
        assert_eq!(quotes.len(), 6);
        assert!((quotes[5].buy - 1.1088).abs() < 1e-12);
    }
}
