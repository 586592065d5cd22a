//! Running per-city and per-year salary aggregates.

use serde::Serialize;
use vacancy_core::models::VacancyRecord;

// ── RunningMean ───────────────────────────────────────────────────────────────

/// Count, sum and mean of the average salaries folded in so far.
///
/// The mean is recomputed as `sum / count` after every push rather than
/// updated incrementally, so the result is independent of how a batch is
/// split into pushes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunningMean {
    pub count: u32,
    pub sum: f64,
    pub average: f64,
}

impl RunningMean {
    fn of(value: f64) -> Self {
        let mut mean = Self::default();
        mean.push(value);
        mean
    }

    /// Add one value to the running totals.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.average = self.sum / f64::from(self.count);
    }
}

// ── CityAggregate ─────────────────────────────────────────────────────────────

/// Vacancy count and average salary for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityAggregate {
    name: String,
    stats: RunningMean,
}

impl CityAggregate {
    /// Start a city aggregate from its first vacancy.
    pub fn new(record: &VacancyRecord) -> Self {
        Self {
            name: record.area_name.clone(),
            stats: RunningMean::of(record.average_salary),
        }
    }

    /// Fold another vacancy of this city into the aggregate.
    pub fn update(&mut self, record: &VacancyRecord) {
        self.stats.push(record.average_salary);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vacancy_count(&self) -> u32 {
        self.stats.count
    }

    pub fn average_salary(&self) -> f64 {
        self.stats.average
    }

    pub fn stats(&self) -> &RunningMean {
        &self.stats
    }
}

// ── YearAggregate ─────────────────────────────────────────────────────────────

/// Vacancy count and average salary for one publication year, overall and
/// for the vacancies whose title contains the selected substring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAggregate {
    year: i32,
    selected_vacancy: String,
    all: RunningMean,
    selected: RunningMean,
}

impl YearAggregate {
    /// Start a year aggregate from its first vacancy.
    pub fn new(record: &VacancyRecord, selected_vacancy: impl Into<String>) -> Self {
        let mut aggregate = Self {
            year: record.year,
            selected_vacancy: selected_vacancy.into(),
            all: RunningMean::default(),
            selected: RunningMean::default(),
        };
        aggregate.update(record);
        aggregate
    }

    /// Fold another vacancy into the aggregate.
    ///
    /// Returns `false` and leaves the aggregate untouched when the vacancy
    /// was published in a different year.
    pub fn update(&mut self, record: &VacancyRecord) -> bool {
        if record.year != self.year {
            return false;
        }
        self.all.push(record.average_salary);
        if record.matches_selected(&self.selected_vacancy) {
            self.selected.push(record.average_salary);
        }
        true
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn selected_vacancy(&self) -> &str {
        &self.selected_vacancy
    }

    pub fn vacancy_count(&self) -> u32 {
        self.all.count
    }

    pub fn average_salary(&self) -> f64 {
        self.all.average
    }

    /// Number of vacancies this year whose title contains the selected substring.
    pub fn selected_count(&self) -> u32 {
        self.selected.count
    }

    /// Average salary of the selected vacancies, `0.0` when there are none.
    pub fn selected_average_salary(&self) -> f64 {
        self.selected.average
    }

    pub fn stats(&self) -> &RunningMean {
        &self.all
    }

    pub fn selected_stats(&self) -> &RunningMean {
        &self.selected
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vacancy_core::models::RawRecord;
    use vacancy_core::normalizer::RecordNormalizer;

    fn vacancy(name: &str, area: &str, year: &str, from: &str, to: &str) -> VacancyRecord {
        let raw: RawRecord = [
            ("name", name),
            ("area_name", area),
            ("published_at", year),
            ("salary_from", from),
            ("salary_to", to),
            ("salary_currency", "RUR"),
        ]
        .into_iter()
        .collect();
        RecordNormalizer::default().normalize(&raw).unwrap()
    }

    // ── CityAggregate ─────────────────────────────────────────────────────────

    #[test]
    fn test_city_from_single_record() {
        let city = CityAggregate::new(&vacancy("Программист", "Екатеринбург", "2015", "7000", "90000"));
        assert_eq!(city.name(), "Екатеринбург");
        assert_eq!(city.average_salary(), 48500.0);
        assert_eq!(city.vacancy_count(), 1);
    }

    #[test]
    fn test_city_update() {
        let mut city =
            CityAggregate::new(&vacancy("Программист", "Екатеринбург", "2015", "70000", "90000"));
        city.update(&vacancy("Художник", "Екатеринбург", "2016", "700", "9000"));
        assert_eq!(city.average_salary(), 42425.0);
        assert_eq!(city.vacancy_count(), 2);
        assert_eq!(city.stats().sum, 84850.0);
    }

    #[test]
    fn test_city_average_is_order_independent() {
        let records = vec![
            vacancy("a", "Москва", "2020", "10000", "30000"),
            vacancy("b", "Москва", "2021", "55000", "61000"),
            vacancy("c", "Москва", "2022", "123456", "234567"),
            vacancy("d", "Москва", "2020", "1", "3"),
        ];

        let mut forward = CityAggregate::new(&records[0]);
        records[1..].iter().for_each(|r| forward.update(r));

        let mut backward = CityAggregate::new(&records[3]);
        records[..3].iter().rev().for_each(|r| backward.update(r));

        assert_eq!(forward.vacancy_count(), backward.vacancy_count());
        assert!((forward.average_salary() - backward.average_salary()).abs() < 1e-9);
    }

    // ── YearAggregate ─────────────────────────────────────────────────────────

    #[test]
    fn test_year_from_single_record() {
        let year = YearAggregate::new(
            &vacancy("Программист", "Екатеринбург", "2015", "70000", "90000"),
            "Программист",
        );
        assert_eq!(year.year(), 2015);
        assert_eq!(year.average_salary(), 80000.0);
        assert_eq!(year.vacancy_count(), 1);
        assert_eq!(year.selected_count(), 1);
        assert_eq!(year.selected_average_salary(), 80000.0);
    }

    #[test]
    fn test_year_update_same_year() {
        let mut year = YearAggregate::new(
            &vacancy("Программист", "Екатеринбург", "2015", "70000", "90000"),
            "Программист",
        );
        assert!(year.update(&vacancy("Программист", "Москва", "2015", "70000", "900000")));
        assert_eq!(year.average_salary(), 282500.0);
        assert_eq!(year.vacancy_count(), 2);
        assert_eq!(year.selected_count(), 2);
        assert_eq!(year.selected_average_salary(), 282500.0);
    }

    #[test]
    fn test_year_update_other_year_is_noop() {
        let mut year = YearAggregate::new(
            &vacancy("Программист", "Екатеринбург", "2015", "70000", "90000"),
            "Программист",
        );
        let before = year.clone();
        assert!(!year.update(&vacancy("Программист", "Москва", "2020", "70000", "900000")));
        assert_eq!(year, before);
        assert_eq!(year.year(), 2015);
        assert_eq!(year.average_salary(), 80000.0);
        assert_eq!(year.vacancy_count(), 1);
        assert_eq!(year.selected_count(), 1);
        assert_eq!(year.selected_average_salary(), 80000.0);
    }

    #[test]
    fn test_year_selected_is_substring_match() {
        let mut year = YearAggregate::new(
            &vacancy("Дизайнер", "Москва", "2019", "50000", "50000"),
            "программист",
        );
        assert_eq!(year.selected_count(), 0);
        assert_eq!(year.selected_average_salary(), 0.0);

        year.update(&vacancy("Ведущий программист C++", "Москва", "2019", "100000", "100000"));
        year.update(&vacancy("Программист", "Москва", "2019", "10", "10"));

        assert_eq!(year.vacancy_count(), 3);
        assert_eq!(year.selected_count(), 1);
        assert_eq!(year.selected_average_salary(), 100000.0);
    }

    #[test]
    fn test_running_mean_sums_then_divides() {
        let mut mean = RunningMean::default();
        for v in [0.1, 0.2, 0.3] {
            mean.push(v);
        }
        assert_eq!(mean.count, 3);
        assert_eq!(mean.average, (0.1 + 0.2 + 0.3) / 3.0);
    }
}
