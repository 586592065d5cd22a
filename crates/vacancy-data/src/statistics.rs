//! Salary and vacancy-count dynamics over a stream of raw vacancy rows.
//!
//! The engine folds every row into per-year and per-city aggregates. The six
//! derived tables are computed by [`StatisticsEngine::finalize`] and cached
//! until the next [`StatisticsEngine::update`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use vacancy_core::models::{IngestPolicy, RawRecord};
use vacancy_core::normalizer::RecordNormalizer;
use vacancy_core::{Result, VacancyError};

use crate::aggregator::{CityAggregate, YearAggregate};

/// Number of cities kept in each city table.
pub const TOP_CITIES: usize = 10;

/// A city enters the city tables when it holds at least this fraction of all
/// vacancies.
pub const CITY_SHARE_THRESHOLD: f64 = 0.01;

// ── Dynamics ──────────────────────────────────────────────────────────────────

/// The six derived statistics tables.
///
/// Year tables list years in first-seen order. City tables are sorted
/// descending and hold at most [`TOP_CITIES`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dynamics {
    /// Year → floored average salary.
    pub year_salary: Vec<(i32, i64)>,
    /// Year → vacancy count.
    pub year_count: Vec<(i32, u32)>,
    /// Year → floored average salary of the selected vacancies.
    pub selected_year_salary: Vec<(i32, i64)>,
    /// Year → count of the selected vacancies.
    pub selected_year_count: Vec<(i32, u32)>,
    /// City → floored average salary.
    pub city_salary: Vec<(String, i64)>,
    /// City → share of all vacancies, rounded to four decimals.
    pub city_count: Vec<(String, f64)>,
}

// ── IngestReport ──────────────────────────────────────────────────────────────

/// A row rejected by [`StatisticsEngine::ingest`].
#[derive(Debug)]
pub struct SkippedRecord {
    /// Zero-based position of the row in the ingested batch.
    pub index: usize,
    pub error: VacancyError,
}

/// Outcome of a batch ingestion.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

// ── StatisticsEngine ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    selected_vacancy: String,
    normalizer: RecordNormalizer,
    years: Vec<YearAggregate>,
    year_index: HashMap<i32, usize>,
    cities: Vec<CityAggregate>,
    city_index: HashMap<String, usize>,
    total: u32,
    dynamics: Option<Dynamics>,
}

impl StatisticsEngine {
    /// Create an empty engine tracking vacancies whose title contains
    /// `selected_vacancy`.
    pub fn new(selected_vacancy: impl Into<String>, normalizer: RecordNormalizer) -> Self {
        Self {
            selected_vacancy: selected_vacancy.into(),
            normalizer,
            years: Vec::new(),
            year_index: HashMap::new(),
            cities: Vec::new(),
            city_index: HashMap::new(),
            total: 0,
            dynamics: None,
        }
    }

    /// Normalize one row and fold it into the aggregates.
    ///
    /// A row that fails to normalize leaves the engine unchanged. Any cached
    /// [`Dynamics`] are dropped.
    pub fn update(&mut self, raw: &RawRecord) -> Result<()> {
        let record = self.normalizer.normalize(raw)?;

        match self.city_index.get(&record.area_name) {
            Some(&i) => self.cities[i].update(&record),
            None => {
                self.city_index
                    .insert(record.area_name.clone(), self.cities.len());
                self.cities.push(CityAggregate::new(&record));
            }
        }

        match self.year_index.get(&record.year) {
            Some(&i) => {
                self.years[i].update(&record);
            }
            None => {
                self.year_index.insert(record.year, self.years.len());
                self.years
                    .push(YearAggregate::new(&record, self.selected_vacancy.as_str()));
            }
        }

        self.total += 1;
        if self.dynamics.take().is_some() {
            debug!("Dropped cached dynamics after update");
        }
        Ok(())
    }

    /// Update the engine with every row of `records`.
    ///
    /// With [`IngestPolicy::AbortOnFirst`] the first bad row is returned as
    /// the error; rows before it stay applied. With
    /// [`IngestPolicy::SkipMalformed`] bad rows are logged and listed in the
    /// report.
    pub fn ingest<'a, I>(&mut self, records: I, policy: IngestPolicy) -> Result<IngestReport>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut report = IngestReport::default();
        for (index, raw) in records.into_iter().enumerate() {
            match self.update(raw) {
                Ok(()) => report.accepted += 1,
                Err(error) => match policy {
                    IngestPolicy::AbortOnFirst => return Err(error),
                    IngestPolicy::SkipMalformed => {
                        warn!(row = index, "Skipping vacancy: {error}");
                        report.skipped.push(SkippedRecord { index, error });
                    }
                },
            }
        }
        info!(
            accepted = report.accepted,
            skipped = report.skipped.len(),
            "Ingested vacancies"
        );
        Ok(report)
    }

    /// Compute the derived tables, or return the cached ones.
    pub fn finalize(&mut self) -> &Dynamics {
        let dynamics = match self.dynamics.take() {
            Some(cached) => cached,
            None => {
                debug!(
                    years = self.years.len(),
                    cities = self.cities.len(),
                    total = self.total,
                    "Deriving dynamics"
                );
                self.derive()
            }
        };
        self.dynamics.insert(dynamics)
    }

    pub fn year_salary_dynamics(&mut self) -> &[(i32, i64)] {
        &self.finalize().year_salary
    }

    pub fn year_count_dynamics(&mut self) -> &[(i32, u32)] {
        &self.finalize().year_count
    }

    pub fn selected_year_salary_dynamics(&mut self) -> &[(i32, i64)] {
        &self.finalize().selected_year_salary
    }

    pub fn selected_year_count_dynamics(&mut self) -> &[(i32, u32)] {
        &self.finalize().selected_year_count
    }

    pub fn city_salary_dynamics(&mut self) -> &[(String, i64)] {
        &self.finalize().city_salary
    }

    pub fn city_count_dynamics(&mut self) -> &[(String, f64)] {
        &self.finalize().city_count
    }

    pub fn selected_vacancy(&self) -> &str {
        &self.selected_vacancy
    }

    /// Number of rows folded in so far.
    pub fn total_count(&self) -> u32 {
        self.total
    }

    /// Year aggregates in first-seen order.
    pub fn years(&self) -> &[YearAggregate] {
        &self.years
    }

    /// City aggregates in first-seen order.
    pub fn cities(&self) -> &[CityAggregate] {
        &self.cities
    }

    pub fn is_finalized(&self) -> bool {
        self.dynamics.is_some()
    }

    /// Cached tables, if [`finalize`](Self::finalize) ran since the last update.
    pub fn dynamics(&self) -> Option<&Dynamics> {
        self.dynamics.as_ref()
    }

    fn derive(&self) -> Dynamics {
        let year_salary = self
            .years
            .iter()
            .map(|y| (y.year(), floor(y.average_salary())))
            .collect();
        let year_count = self
            .years
            .iter()
            .map(|y| (y.year(), y.vacancy_count()))
            .collect();
        let selected_year_salary = self
            .years
            .iter()
            .map(|y| (y.year(), floor(y.selected_average_salary())))
            .collect();
        let selected_year_count = self
            .years
            .iter()
            .map(|y| (y.year(), y.selected_count()))
            .collect();

        let total = f64::from(self.total);
        let eligible: Vec<&CityAggregate> = self
            .cities
            .iter()
            .filter(|c| f64::from(c.vacancy_count()) >= total * CITY_SHARE_THRESHOLD)
            .collect();

        // Both tables sort from first-seen order so ties stay in that order.
        let mut by_salary = eligible.clone();
        by_salary.sort_by(|a, b| b.average_salary().total_cmp(&a.average_salary()));
        let city_salary = by_salary
            .iter()
            .take(TOP_CITIES)
            .map(|c| (c.name().to_string(), floor(c.average_salary())))
            .collect();

        let mut by_count = eligible;
        by_count.sort_by(|a, b| b.vacancy_count().cmp(&a.vacancy_count()));
        let city_count = by_count
            .iter()
            .take(TOP_CITIES)
            .map(|c| (c.name().to_string(), share(c.vacancy_count(), self.total)))
            .collect();

        Dynamics {
            year_salary,
            year_count,
            selected_year_salary,
            selected_year_count,
            city_salary,
            city_count,
        }
    }
}

fn floor(value: f64) -> i64 {
    value.floor() as i64
}

/// `count / total` rounded to four decimals, ties to even.
fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(total) * 10_000.0).round_ties_even() / 10_000.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
