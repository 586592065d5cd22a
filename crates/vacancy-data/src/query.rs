//! Filtering, sorting and pagination of vacancies for tabular display.
//!
//! [`VacancyQuery::parse`] validates user-typed [`QueryOptions`] up front;
//! [`VacancyQuery::apply`] then runs the filter, the sort and the row slice
//! over a list of [`DisplayRecord`]s.

use std::cmp::Ordering;

use serde::Serialize;
use vacancy_core::currency::CurrencyTable;
use vacancy_core::formatting::{clean_text, format_date, format_money, truncate};
use vacancy_core::models::{fields, QueryOptions, RawRecord};
use vacancy_core::normalizer::parse_flag;
use vacancy_core::vocabulary::{
    currency_label, experience_label, flag_label, parse_yes_no, DisplayField,
    ExperienceWeights, GROSS_SALARY_LABEL, NET_SALARY_LABEL, ROW_NUMBER_LABEL,
};
use vacancy_core::{Result, VacancyError};

/// Cells longer than this many characters are cut and suffixed with `...`.
pub const CELL_MAX_CHARS: usize = 100;

// ── DisplayRecord ─────────────────────────────────────────────────────────────

/// A vacancy prepared for the table: HTML stripped, whitespace collapsed and
/// vocabulary values translated to Russian.
///
/// Raw salary bounds, currency code, experience id and timestamp are kept
/// alongside the display text because filtering and sorting use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub experience_id: String,
    pub experience: String,
    pub premium: String,
    pub employer: String,
    pub salary_from: String,
    pub salary_to: String,
    pub salary_currency: String,
    pub salary_gross: Option<bool>,
    pub area: String,
    pub published_at: String,
}

impl DisplayRecord {
    /// Build a display record. Absent columns become empty strings.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let text = |field: &str| raw.get(field).map(clean_text).unwrap_or_default();

        let experience_id = text(fields::EXPERIENCE_ID);
        let experience = experience_label(&experience_id)
            .map(str::to_string)
            .unwrap_or_else(|| experience_id.clone());

        let premium = text(fields::PREMIUM);
        let premium = parse_flag(&premium)
            .map(|flag| flag_label(flag).to_string())
            .unwrap_or(premium);

        let skills = text(fields::KEY_SKILLS);
        let skills = if skills.is_empty() {
            Vec::new()
        } else {
            skills.split('\n').map(str::to_string).collect()
        };

        Self {
            name: text(fields::NAME),
            description: text(fields::DESCRIPTION),
            skills,
            experience_id,
            experience,
            premium,
            employer: text(fields::EMPLOYER_NAME),
            salary_from: text(fields::SALARY_FROM),
            salary_to: text(fields::SALARY_TO),
            salary_currency: text(fields::SALARY_CURRENCY),
            salary_gross: raw.get(fields::SALARY_GROSS).and_then(parse_flag),
            area: text(fields::AREA_NAME),
            published_at: text(fields::PUBLISHED_AT),
        }
    }

    /// Display text of `field`, untruncated.
    pub fn value(&self, field: DisplayField) -> String {
        match field {
            DisplayField::Name => self.name.clone(),
            DisplayField::Description => self.description.clone(),
            DisplayField::Skills => self.skills.join("\n"),
            DisplayField::Experience => self.experience.clone(),
            DisplayField::Premium => self.premium.clone(),
            DisplayField::Employer => self.employer.clone(),
            DisplayField::Salary => self.salary_text(),
            DisplayField::Area => self.area.clone(),
            DisplayField::PublishedAt => format_date(&self.published_at),
            DisplayField::Currency => self.currency_text().to_string(),
        }
    }

    fn currency_text(&self) -> &str {
        currency_label(&self.salary_currency).unwrap_or(&self.salary_currency)
    }

    fn salary_text(&self) -> String {
        let mut text = format!(
            "{} - {} ({})",
            format_money(&self.salary_from),
            format_money(&self.salary_to),
            self.currency_text()
        );
        if let Some(gross) = self.salary_gross {
            let tax = if gross { GROSS_SALARY_LABEL } else { NET_SALARY_LABEL };
            text.push_str(&format!(" ({tax})"));
        }
        text
    }

    /// Midpoint of the salary bounds in rubles, `None` when it cannot be
    /// computed.
    fn salary_in_rubles(&self, currencies: &CurrencyTable) -> Option<f64> {
        let from: f64 = self.salary_from.parse().ok()?;
        let to: f64 = self.salary_to.parse().ok()?;
        let rate = currencies.rate(&self.salary_currency).ok()?;
        Some((from * rate + to * rate) / 2.0)
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// One table row: its 1-based number and the vacancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub number: usize,
    pub record: DisplayRecord,
}

impl TableRow {
    /// Cells for `columns`, preceded by the row number, truncated to
    /// [`CELL_MAX_CHARS`].
    pub fn cells(&self, columns: &[DisplayField]) -> Vec<String> {
        std::iter::once(self.number.to_string())
            .chain(
                columns
                    .iter()
                    .map(|&field| truncate(&self.record.value(field), CELL_MAX_CHARS)),
            )
            .collect()
    }
}

/// Filtered, sorted and sliced rows with the resolved column set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<DisplayField>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Column headers including the leading `№`.
    pub fn headers(&self) -> Vec<&'static str> {
        std::iter::once(ROW_NUMBER_LABEL)
            .chain(self.columns.iter().map(|f| f.label()))
            .collect()
    }

    /// All rows as cell text, in display order.
    pub fn cell_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| row.cells(&self.columns)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryOutcome {
    Rows(TableView),
    /// The filter left no vacancies.
    NothingFound,
}

// ── VacancyQuery ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Filter {
    /// Every listed skill must be one of the record's skill lines.
    Skills(Vec<String>),
    /// The amount must lie within the raw salary bounds.
    Salary(f64),
    /// The `dd.mm.yyyy` publication date must match.
    PublishedAt(String),
    /// Display text of the field must match.
    Equals(DisplayField, String),
}

impl Filter {
    fn matches(&self, record: &DisplayRecord) -> bool {
        match self {
            Filter::Skills(wanted) => wanted
                .iter()
                .all(|skill| record.skills.iter().any(|have| have == skill)),
            Filter::Salary(amount) => {
                match (
                    record.salary_from.parse::<f64>(),
                    record.salary_to.parse::<f64>(),
                ) {
                    (Ok(from), Ok(to)) => from <= *amount && *amount <= to,
                    _ => false,
                }
            }
            Filter::PublishedAt(date) => format_date(&record.published_at) == *date,
            Filter::Equals(field, value) => record.value(*field) == *value,
        }
    }
}

/// A validated vacancy-table query.
#[derive(Debug, Clone)]
pub struct VacancyQuery {
    filter: Option<Filter>,
    sort_field: Option<DisplayField>,
    reverse: bool,
    start: usize,
    end: Option<usize>,
    columns: Vec<DisplayField>,
    currencies: CurrencyTable,
    experience: ExperienceWeights,
}

impl VacancyQuery {
    /// Validate `options`.
    ///
    /// # Errors
    ///
    /// * [`VacancyError::InvalidFilterFormat`] when a non-empty filter lacks
    ///   `": "`, or a salary filter value is not a number.
    /// * [`VacancyError::InvalidFilterField`] when the filter field is unknown.
    /// * [`VacancyError::InvalidSortField`] when the sort field is unknown.
    /// * [`VacancyError::InvalidSortOrder`] when the reverse token is not
    ///   `Да`, `Нет` or empty.
    /// * [`VacancyError::InvalidRowRange`] when the range is not one or two
    ///   positive integers.
    /// * [`VacancyError::InvalidColumn`] when a requested column is unknown.
    pub fn parse(options: &QueryOptions) -> Result<Self> {
        let filter = parse_filter(&options.filter)?;

        let sort_field = match options.sort_field.as_str() {
            "" => None,
            label => Some(
                DisplayField::from_label(label)
                    .filter(|f| f.is_column())
                    .ok_or_else(|| VacancyError::InvalidSortField(label.to_string()))?,
            ),
        };

        let reverse = parse_yes_no(&options.reverse)
            .ok_or_else(|| VacancyError::InvalidSortOrder(options.reverse.clone()))?;

        let (start, end) = parse_row_range(&options.row_range)?;
        let columns = parse_columns(&options.columns)?;

        Ok(Self {
            filter,
            sort_field,
            reverse,
            start,
            end,
            columns,
            currencies: CurrencyTable::default(),
            experience: ExperienceWeights::default(),
        })
    }

    /// Use `currencies` for the salary sort.
    pub fn with_currencies(mut self, currencies: CurrencyTable) -> Self {
        self.currencies = currencies;
        self
    }

    /// Use `weights` for the experience sort.
    pub fn with_experience_weights(mut self, weights: ExperienceWeights) -> Self {
        self.experience = weights;
        self
    }

    pub fn columns(&self) -> &[DisplayField] {
        &self.columns
    }

    /// Filter, sort and slice `records`.
    ///
    /// Rows are numbered after sorting and before slicing, so a slice keeps
    /// the numbers of the full listing.
    pub fn apply(&self, records: &[DisplayRecord]) -> QueryOutcome {
        let mut matched: Vec<&DisplayRecord> = match &self.filter {
            Some(filter) => records.iter().filter(|r| filter.matches(r)).collect(),
            None => records.iter().collect(),
        };
        if matched.is_empty() {
            return QueryOutcome::NothingFound;
        }

        if let Some(field) = self.sort_field {
            matched.sort_by(|a, b| {
                let ordering = self.compare(field, a, b);
                if self.reverse {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let end = self.end.unwrap_or(matched.len()).min(matched.len());
        let start = self.start.min(end);
        let rows = matched
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(i, record)| TableRow {
                number: i + 1,
                record: record.clone(),
            })
            .collect();

        QueryOutcome::Rows(TableView {
            columns: self.columns.clone(),
            rows,
        })
    }

    fn compare(&self, field: DisplayField, a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
        match field {
            DisplayField::Skills => a.skills.len().cmp(&b.skills.len()),
            DisplayField::Salary => {
                // Unparseable salaries sort after every real one.
                let key = |r: &DisplayRecord| r.salary_in_rubles(&self.currencies).unwrap_or(f64::INFINITY);
                key(a).total_cmp(&key(b))
            }
            DisplayField::Experience => self
                .experience
                .weight(&a.experience_id)
                .cmp(&self.experience.weight(&b.experience_id)),
            DisplayField::PublishedAt => a.published_at.cmp(&b.published_at),
            other => a.value(other).cmp(&b.value(other)),
        }
    }
}

// ── Option parsing ────────────────────────────────────────────────────────────

fn parse_filter(raw: &str) -> Result<Option<Filter>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let (label, value) = raw
        .split_once(": ")
        .ok_or_else(|| VacancyError::InvalidFilterFormat(raw.to_string()))?;
    let field = DisplayField::from_label(label)
        .ok_or_else(|| VacancyError::InvalidFilterField(label.to_string()))?;

    let filter = match field {
        DisplayField::Skills => Filter::Skills(value.split(", ").map(str::to_string).collect()),
        DisplayField::Salary => Filter::Salary(
            value
                .trim()
                .parse()
                .map_err(|_| VacancyError::InvalidFilterFormat(raw.to_string()))?,
        ),
        DisplayField::PublishedAt => Filter::PublishedAt(value.to_string()),
        other => Filter::Equals(other, value.to_string()),
    };
    Ok(Some(filter))
}

/// `""` → everything, `"s"` → from row `s`, `"s e"` → rows `s..e`.
fn parse_row_range(raw: &str) -> Result<(usize, Option<usize>)> {
    let invalid = || VacancyError::InvalidRowRange(raw.to_string());
    let bounds = raw
        .split_whitespace()
        .map(|token| match token.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(invalid()),
        })
        .collect::<Result<Vec<usize>>>()?;

    match bounds.as_slice() {
        [] => Ok((0, None)),
        [start] => Ok((*start, None)),
        [start, end] => Ok((*start, Some(*end))),
        _ => Err(invalid()),
    }
}

fn parse_columns(raw: &str) -> Result<Vec<DisplayField>> {
    if raw.is_empty() {
        return Ok(DisplayField::COLUMNS.to_vec());
    }
    raw.split(", ")
        .filter(|label| *label != ROW_NUMBER_LABEL)
        .map(|label| {
            DisplayField::from_label(label)
                .filter(|f| f.is_column())
                .ok_or_else(|| VacancyError::InvalidColumn(label.to_string()))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, skills: &[&str], from: &str, to: &str, currency: &str) -> DisplayRecord {
        DisplayRecord {
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_id: "noExperience".to_string(),
            experience: "Нет опыта".to_string(),
            premium: "Нет".to_string(),
            employer: "ООО Ромашка".to_string(),
            salary_from: from.to_string(),
            salary_to: to.to_string(),
            salary_currency: currency.to_string(),
            area: "Москва".to_string(),
            published_at: "2022-07-05T18:23:15+0300".to_string(),
            ..Default::default()
        }
    }

    fn options(filter: &str, sort: &str, reverse: &str, rows: &str, columns: &str) -> QueryOptions {
        QueryOptions {
            filter: filter.to_string(),
            sort_field: sort.to_string(),
            reverse: reverse.to_string(),
            row_range: rows.to_string(),
            columns: columns.to_string(),
        }
    }

    fn table_rows(outcome: QueryOutcome) -> Vec<TableRow> {
        match outcome {
            QueryOutcome::Rows(view) => view.rows,
            QueryOutcome::NothingFound => panic!("expected rows"),
        }
    }

    fn names(outcome: QueryOutcome) -> Vec<String> {
        table_rows(outcome).into_iter().map(|r| r.record.name).collect()
    }

    fn run(opts: QueryOptions, records: &[DisplayRecord]) -> QueryOutcome {
        VacancyQuery::parse(&opts).unwrap().apply(records)
    }

    // ── DisplayRecord ─────────────────────────────────────────────────────────

    #[test]
    fn test_from_raw_cleans_and_translates() {
        let raw: RawRecord = [
            ("name", "<b>Программист</b>"),
            ("description", "<p>Опыт   работы</p>"),
            ("key_skills", "Python\nAgile"),
            ("experience_id", "between1And3"),
            ("premium", "FALSE"),
            ("employer_name", "  Яндекс "),
            ("salary_from", "100000.0"),
            ("salary_to", "150000.0"),
            ("salary_gross", "False"),
            ("salary_currency", "RUR"),
            ("area_name", "Москва"),
            ("published_at", "2022-07-05T18:23:15+0300"),
        ]
        .into_iter()
        .collect();

        let record = DisplayRecord::from_raw(&raw);
        assert_eq!(record.name, "Программист");
        assert_eq!(record.description, "Опыт работы");
        assert_eq!(record.skills, vec!["Python", "Agile"]);
        assert_eq!(record.experience, "От 1 года до 3 лет");
        assert_eq!(record.premium, "Нет");
        assert_eq!(record.employer, "Яндекс");
        assert_eq!(
            record.value(DisplayField::Salary),
            "100 000 - 150 000 (Рубли) (С вычетом налогов)"
        );
        assert_eq!(record.value(DisplayField::PublishedAt), "05.07.2022");
        assert_eq!(record.value(DisplayField::Currency), "Рубли");
    }

    #[test]
    fn test_salary_text_without_tax_flag() {
        let r = record("a", &[], "4500", "5500", "EUR");
        assert_eq!(r.value(DisplayField::Salary), "4 500 - 5 500 (Евро)");
    }

    #[test]
    fn test_missing_columns_become_empty() {
        let raw: RawRecord = [("name", "a")].into_iter().collect();
        let record = DisplayRecord::from_raw(&raw);
        assert!(record.skills.is_empty());
        assert_eq!(record.area, "");
        assert!(record.salary_gross.is_none());
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_invalid_filter_format() {
        let err = VacancyQuery::parse(&options("Навыки Python", "", "", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidFilterFormat(_)));
    }

    #[test]
    fn test_invalid_filter_field() {
        let err = VacancyQuery::parse(&options("Зарплата: 100", "", "", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidFilterField(f) if f == "Зарплата"));
    }

    #[test]
    fn test_salary_filter_must_be_numeric() {
        let err = VacancyQuery::parse(&options("Оклад: много", "", "", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidFilterFormat(_)));
    }

    #[test]
    fn test_currency_filter_is_accepted_but_not_sortable() {
        assert!(VacancyQuery::parse(&options("Идентификатор валюты оклада: Рубли", "", "", "", "")).is_ok());
        let err = VacancyQuery::parse(&options("", "Идентификатор валюты оклада", "", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidSortField(_)));
    }

    #[test]
    fn test_invalid_sort_field() {
        let err = VacancyQuery::parse(&options("", "Зарплата", "", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidSortField(_)));
    }

    #[test]
    fn test_invalid_sort_order() {
        let err = VacancyQuery::parse(&options("", "Название", "yes", "", "")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidSortOrder(t) if t == "yes"));
    }

    #[test]
    fn test_invalid_row_range() {
        for range in ["0", "a b", "1 2 3", "-1"] {
            let err = VacancyQuery::parse(&options("", "", "", range, "")).unwrap_err();
            assert!(matches!(err, VacancyError::InvalidRowRange(_)), "{range:?}");
        }
    }

    #[test]
    fn test_invalid_column() {
        let err = VacancyQuery::parse(&options("", "", "", "", "Название, Зарплата")).unwrap_err();
        assert!(matches!(err, VacancyError::InvalidColumn(c) if c == "Зарплата"));
    }

    #[test]
    fn test_validation_errors_are_query_errors() {
        let err = VacancyQuery::parse(&options("x", "", "", "", "")).unwrap_err();
        assert!(err.is_query_error());
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_skills_filter_requires_every_skill_exactly() {
        let records = vec![
            record("all", &["Python", "Agile", "Docker"], "1", "2", "RUR"),
            record("lower", &["python", "agile"], "1", "2", "RUR"),
            record("partial", &["Python"], "1", "2", "RUR"),
            record("substring", &["Python 3", "Agile"], "1", "2", "RUR"),
        ];
        let outcome = run(options("Навыки: Python, Agile", "", "", "", ""), &records);
        assert_eq!(names(outcome), vec!["all"]);
    }

    #[test]
    fn test_salary_filter_is_inclusive_on_raw_values() {
        let records = vec![
            record("low-edge", &[], "100", "200", "RUR"),
            record("high-edge", &[], "50", "100", "EUR"),
            record("outside", &[], "101", "300", "RUR"),
        ];
        let outcome = run(options("Оклад: 100", "", "", "", ""), &records);
        assert_eq!(names(outcome), vec!["low-edge", "high-edge"]);
    }

    #[test]
    fn test_date_filter_uses_display_format() {
        let mut other = record("other", &[], "1", "2", "RUR");
        other.published_at = "2022-07-06T10:00:00+0300".to_string();
        let records = vec![record("match", &[], "1", "2", "RUR"), other];
        let outcome = run(options("Дата публикации вакансии: 05.07.2022", "", "", "", ""), &records);
        assert_eq!(names(outcome), vec!["match"]);
    }

    #[test]
    fn test_equality_filter_on_display_value() {
        let mut premium = record("premium", &[], "1", "2", "RUR");
        premium.premium = "Да".to_string();
        let records = vec![premium, record("plain", &[], "1", "2", "USD")];

        assert_eq!(
            names(run(options("Премиум-вакансия: Да", "", "", "", ""), &records)),
            vec!["premium"]
        );
        assert_eq!(
            names(run(options("Идентификатор валюты оклада: Доллары", "", "", "", ""), &records)),
            vec!["plain"]
        );
    }

    #[test]
    fn test_empty_filter_result_is_nothing_found() {
        let records = vec![record("a", &["Rust"], "1", "2", "RUR")];
        let outcome = run(options("Навыки: Haskell", "", "", "", ""), &records);
        assert_eq!(outcome, QueryOutcome::NothingFound);
    }

    // ── Sorting ───────────────────────────────────────────────────────────────

    #[test]
    fn test_sort_by_salary_converts_currency() {
        let records = vec![
            record("rub", &[], "1000", "2000", "RUR"),
            record("eur", &[], "100", "100", "EUR"),
            record("byr", &[], "10", "10", "BYR"),
        ];
        assert_eq!(
            names(run(options("", "Оклад", "", "", ""), &records)),
            vec!["byr", "rub", "eur"]
        );
        assert_eq!(
            names(run(options("", "Оклад", "Да", "", ""), &records)),
            vec!["eur", "rub", "byr"]
        );
    }

    #[test]
    fn test_sort_by_skill_count() {
        let records = vec![
            record("three", &["a", "b", "c"], "1", "1", "RUR"),
            record("one", &["a"], "1", "1", "RUR"),
            record("two", &["a", "b"], "1", "1", "RUR"),
        ];
        assert_eq!(
            names(run(options("", "Навыки", "", "", ""), &records)),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_sort_by_experience_weight() {
        let mut senior = record("senior", &[], "1", "1", "RUR");
        senior.experience_id = "moreThan6".to_string();
        senior.experience = "Более 6 лет".to_string();
        let mut middle = record("middle", &[], "1", "1", "RUR");
        middle.experience_id = "between1And3".to_string();
        middle.experience = "От 1 года до 3 лет".to_string();
        let junior = record("junior", &[], "1", "1", "RUR");

        let records = vec![senior, junior, middle];
        assert_eq!(
            names(run(options("", "Опыт работы", "", "", ""), &records)),
            vec!["junior", "middle", "senior"]
        );
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = vec![
            record("b", &[], "1", "1", "RUR"),
            record("a", &[], "1", "1", "RUR"),
            record("c", &[], "1", "1", "RUR"),
        ];
        // Equal keys keep their input order.
        assert_eq!(
            names(run(options("", "Компания", "", "", ""), &records)),
            vec!["b", "a", "c"]
        );
        assert_eq!(
            names(run(options("", "Компания", "Да", "", ""), &records)),
            vec!["b", "a", "c"]
        );
        assert_eq!(
            names(run(options("", "Название", "Нет", "", ""), &records)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_sort_by_date_uses_raw_timestamp() {
        let mut early = record("early", &[], "1", "1", "RUR");
        early.published_at = "2021-12-31T00:00:00+0300".to_string();
        let late = record("late", &[], "1", "1", "RUR");
        // dd.mm.yyyy ordering would put "31.12.2021" after "05.07.2022".
        assert_eq!(
            names(run(options("", "Дата публикации вакансии", "", "", ""), &[late, early])),
            vec!["early", "late"]
        );
    }

    // ── Pagination & columns ──────────────────────────────────────────────────

    fn ten_records() -> Vec<DisplayRecord> {
        (1..=10)
            .map(|i| record(&format!("v{i}"), &[], "1", "1", "RUR"))
            .collect()
    }

    #[test]
    fn test_row_range_is_half_open_and_keeps_numbers() {
        let rows = table_rows(run(options("", "", "", "3 6", ""), &ten_records()));
        let numbers: Vec<usize> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
        assert_eq!(rows[0].record.name, "v3");
    }

    #[test]
    fn test_row_range_start_only() {
        let rows = table_rows(run(options("", "", "", "9", ""), &ten_records()));
        let numbers: Vec<usize> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![9, 10]);
    }

    #[test]
    fn test_row_range_past_the_end() {
        let rows = table_rows(run(options("", "", "", "8 50", ""), &ten_records()));
        assert_eq!(rows.len(), 3);
        let rows_after = table_rows(run(options("", "", "", "20", ""), &ten_records()));
        assert!(rows_after.is_empty());
    }

    #[test]
    fn test_numbers_follow_sort_order() {
        let records = vec![
            record("b", &[], "1", "1", "RUR"),
            record("a", &[], "1", "1", "RUR"),
        ];
        let rows = table_rows(run(options("", "Название", "", "2", ""), &records));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[0].record.name, "b");
    }

    #[test]
    fn test_default_columns() {
        let QueryOutcome::Rows(view) = run(options("", "", "", "", ""), &ten_records()) else {
            panic!("expected rows");
        };
        assert_eq!(view.columns, DisplayField::COLUMNS.to_vec());
        assert_eq!(view.headers()[0], "№");
        assert_eq!(view.headers().len(), 10);
    }

    #[test]
    fn test_column_subset_keeps_requested_order() {
        let QueryOutcome::Rows(view) =
            run(options("", "", "", "1 2", "Оклад, Название"), &ten_records())
        else {
            panic!("expected rows");
        };
        assert_eq!(view.headers(), vec!["№", "Оклад", "Название"]);
        assert_eq!(view.cell_rows(), vec![vec!["1", "1 - 1 (Рубли)", "v1"]]);
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let mut long = record("a", &[], "1", "1", "RUR");
        long.description = "x".repeat(150);
        let row = TableRow { number: 1, record: long };
        let cells = row.cells(&[DisplayField::Description]);
        assert_eq!(cells[1].chars().count(), CELL_MAX_CHARS + 3);
        assert!(cells[1].ends_with("..."));
    }
}
