use std::collections::HashMap;

use crate::error::{Result, VacancyError};

/// Currency code → multiplier converting one unit into rubles.
///
/// Rates are the fixed historical values the vacancy exports were priced
/// against; the ruble (`RUR`) is the base unit.
pub const DEFAULT_RATES: &[(&str, f64)] = &[
    ("AZN", 35.68),
    ("BYR", 23.91),
    ("EUR", 59.90),
    ("GEL", 21.74),
    ("KGS", 0.76),
    ("KZT", 0.13),
    ("RUR", 1.0),
    ("UAH", 1.64),
    ("USD", 60.66),
    ("UZS", 0.0055),
];

/// Conversion table used by the normalizer and the salary sort.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    rates: HashMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::from_rates(DEFAULT_RATES.iter().map(|&(code, rate)| (code, rate)))
    }
}

impl CurrencyTable {
    /// Build a table holding exactly `rates`.
    pub fn from_rates<K: Into<String>>(rates: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Return a copy of the table with `code` set to `rate`.
    pub fn with_rate(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(code.into(), rate);
        self
    }

    pub fn rate(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| VacancyError::UnknownCurrency(code.to_string()))
    }

    /// Convert `amount` of `code` into rubles.
    pub fn convert(&self, amount: f64, code: &str) -> Result<f64> {
        Ok(amount * self.rate(code)?)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Known currency codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
