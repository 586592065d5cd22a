//! Conversion of raw CSV rows into typed [`VacancyRecord`]s.

use crate::currency::CurrencyTable;
use crate::error::{Result, VacancyError};
use crate::models::{fields, RawRecord, VacancyRecord};

// ── RecordNormalizer ──────────────────────────────────────────────────────────

/// Turns [`RawRecord`]s into [`VacancyRecord`]s using an injected currency table.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    currencies: CurrencyTable,
}

impl RecordNormalizer {
    pub fn new(currencies: CurrencyTable) -> Self {
        Self { currencies }
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Normalize one raw record.
    ///
    /// `average_salary` is `((salary_from + salary_to) / 2) * rate(currency)`
    /// and `year` is the integer formed by the first four characters of
    /// `published_at`.
    ///
    /// # Errors
    ///
    /// * [`VacancyError::MissingField`] when a required column is absent.
    /// * [`VacancyError::MalformedRecord`] when a salary bound or the year
    ///   cannot be parsed.
    /// * [`VacancyError::UnknownCurrency`] when the currency has no rate.
    pub fn normalize(&self, raw: &RawRecord) -> Result<VacancyRecord> {
        let name = required(raw, fields::NAME)?;
        let area_name = required(raw, fields::AREA_NAME)?;
        let published_at = required(raw, fields::PUBLISHED_AT)?;
        let salary_currency = required(raw, fields::SALARY_CURRENCY)?;

        let salary_from = parse_amount(fields::SALARY_FROM, required(raw, fields::SALARY_FROM)?)?;
        let salary_to = parse_amount(fields::SALARY_TO, required(raw, fields::SALARY_TO)?)?;
        let year = parse_year(published_at)?;

        let rate = self.currencies.rate(salary_currency).map_err(|e| {
            tracing::debug!(currency = salary_currency, "no conversion rate");
            e
        })?;
        let average_salary = ((salary_from + salary_to) / 2.0) * rate;

        Ok(VacancyRecord {
            name: name.to_string(),
            area_name: area_name.to_string(),
            published_at: published_at.to_string(),
            salary_from,
            salary_to,
            salary_currency: salary_currency.to_string(),
            salary_gross: raw.get(fields::SALARY_GROSS).and_then(parse_flag),
            description: optional(raw, fields::DESCRIPTION),
            key_skills: optional(raw, fields::KEY_SKILLS),
            employer_name: optional(raw, fields::EMPLOYER_NAME),
            experience_id: optional(raw, fields::EXPERIENCE_ID),
            premium: raw.get(fields::PREMIUM).and_then(parse_flag),
            average_salary,
            year,
        })
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Parse the boolean spellings used by the vacancy exports.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a salary bound. Accepts anything `f64` accepts except NaN / infinity.
pub fn parse_amount(field: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(VacancyError::malformed(field, value)),
    }
}

/// Extract the four-digit year that prefixes an ISO-like timestamp.
pub fn parse_year(published_at: &str) -> Result<i32> {
    published_at
        .get(..4)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| VacancyError::malformed(fields::PUBLISHED_AT, published_at))
}

fn required<'a>(raw: &'a RawRecord, field: &str) -> Result<&'a str> {
    raw.get(field)
        .ok_or_else(|| VacancyError::MissingField(field.to_string()))
}

fn optional(raw: &RawRecord, field: &str) -> Option<String> {
    raw.get(field)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
