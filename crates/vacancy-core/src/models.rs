use serde::{Deserialize, Serialize};

/// Column names of the vacancy CSV export that the normalizer relies on.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const KEY_SKILLS: &str = "key_skills";
    pub const EXPERIENCE_ID: &str = "experience_id";
    pub const PREMIUM: &str = "premium";
    pub const EMPLOYER_NAME: &str = "employer_name";
    pub const SALARY_FROM: &str = "salary_from";
    pub const SALARY_TO: &str = "salary_to";
    pub const SALARY_GROSS: &str = "salary_gross";
    pub const SALARY_CURRENCY: &str = "salary_currency";
    pub const AREA_NAME: &str = "area_name";
    pub const PUBLISHED_AT: &str = "published_at";
}

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// One untyped vacancy row: header name → cell text, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// ── VacancyRecord ─────────────────────────────────────────────────────────────

/// A normalized vacancy with its derived average salary (in rubles) and year.
///
/// Built by [`crate::normalizer::RecordNormalizer`]; the salary bounds are kept
/// exactly as published, so `salary_from <= salary_to` is not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    /// Job title.
    pub name: String,
    /// City / region name.
    pub area_name: String,
    /// Publication timestamp as found in the source, e.g. `2022-07-17T18:23:06+0300`.
    pub published_at: String,
    /// Lower salary bound in `salary_currency`.
    pub salary_from: f64,
    /// Upper salary bound in `salary_currency`.
    pub salary_to: f64,
    /// Currency code, e.g. `"RUR"`.
    pub salary_currency: String,
    /// Whether the salary is stated before tax, when known.
    #[serde(default)]
    pub salary_gross: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    /// Newline-delimited list of skills.
    #[serde(default)]
    pub key_skills: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub experience_id: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    /// Mean of the salary bounds converted to rubles.
    pub average_salary: f64,
    /// Four-digit publication year.
    pub year: i32,
}

impl VacancyRecord {
    /// `true` when the job title contains `selected` (case-sensitive).
    pub fn matches_selected(&self, selected: &str) -> bool {
        self.name.contains(selected)
    }
}

// ── QueryOptions ──────────────────────────────────────────────────────────────

/// Unvalidated vacancy-table options exactly as typed by the user.
///
/// Every field may be empty, meaning "not requested".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// `"<field label>: <value>"`.
    pub filter: String,
    /// Label of the field to sort by.
    pub sort_field: String,
    /// `"Да"` / `"Нет"`.
    pub reverse: String,
    /// `"<start>"` or `"<start> <end>"`, 1-indexed.
    pub row_range: String,
    /// `", "`-separated field labels.
    pub columns: String,
}

// ── IngestPolicy ──────────────────────────────────────────────────────────────

/// What a batch ingestion does with a record that fails to normalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    /// Stop the batch at the first bad record.
    #[default]
    AbortOnFirst,
    /// Skip bad records and report them after the batch.
    SkipMalformed,
}
