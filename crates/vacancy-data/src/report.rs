//! Report files built from finalized [`Dynamics`].
//!
//! Emitters only format what the engine already derived; nothing here
//! recomputes statistics.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use vacancy_core::formatting::format_share;
use vacancy_core::Result;

use crate::statistics::Dynamics;

pub const YEARS_FILE: &str = "years.csv";
pub const CITIES_FILE: &str = "cities.csv";
pub const JSON_FILE: &str = "report.json";

/// Captions of the six dynamics tables, in [`Dynamics`] field order.
pub const TABLE_CAPTIONS: [&str; 6] = [
    "Динамика уровня зарплат по годам",
    "Динамика количества вакансий по годам",
    "Динамика уровня зарплат по годам для выбранной профессии",
    "Динамика количества вакансий по годам для выбранной профессии",
    "Уровень зарплат по городам (в порядке убывания)",
    "Доля вакансий по городам (в порядке убывания)",
];

/// Paths written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub years: PathBuf,
    pub cities: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    selected_vacancy: &'a str,
    #[serde(flatten)]
    dynamics: &'a Dynamics,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Titles of the per-year sheet.
pub fn year_titles(selected_vacancy: &str) -> [String; 5] {
    [
        "Год".to_string(),
        "Средняя зарплата".to_string(),
        format!("Средняя зарплата - {selected_vacancy}"),
        "Количество вакансий".to_string(),
        format!("Количество вакансий - {selected_vacancy}"),
    ]
}

/// Titles of the per-city sheet. The blank column separates the two tables.
pub fn city_titles() -> [&'static str; 5] {
    ["Город", "Уровень зарплат", "", "Город", "Доля вакансий"]
}

/// Per-year sheet rows. All four year tables list the same years in the
/// same order.
pub fn year_rows(dynamics: &Dynamics) -> Vec<[String; 5]> {
    dynamics
        .year_salary
        .iter()
        .enumerate()
        .map(|(i, &(year, salary))| {
            [
                year.to_string(),
                salary.to_string(),
                cell(dynamics.selected_year_salary.get(i).map(|v| v.1)),
                cell(dynamics.year_count.get(i).map(|v| v.1)),
                cell(dynamics.selected_year_count.get(i).map(|v| v.1)),
            ]
        })
        .collect()
}

/// Per-city sheet rows: salary table on the left, share table on the right.
pub fn city_rows(dynamics: &Dynamics) -> Vec<[String; 5]> {
    let len = dynamics.city_salary.len().max(dynamics.city_count.len());
    (0..len)
        .map(|i| {
            let (salary_city, salary) = match dynamics.city_salary.get(i) {
                Some((city, salary)) => (city.clone(), salary.to_string()),
                None => (String::new(), String::new()),
            };
            let (share_city, share) = match dynamics.city_count.get(i) {
                Some((city, share)) => (city.clone(), format_share(*share)),
                None => (String::new(), String::new()),
            };
            [salary_city, salary, String::new(), share_city, share]
        })
        .collect()
}

/// Write `years.csv`, `cities.csv` and `report.json` into `dir`, creating it
/// when needed.
pub fn write_reports(dir: &Path, dynamics: &Dynamics, selected_vacancy: &str) -> Result<ReportFiles> {
    std::fs::create_dir_all(dir)?;
    let files = ReportFiles {
        years: dir.join(YEARS_FILE),
        cities: dir.join(CITIES_FILE),
        json: dir.join(JSON_FILE),
    };

    let mut years = csv::Writer::from_path(&files.years)?;
    years.write_record(year_titles(selected_vacancy))?;
    for row in year_rows(dynamics) {
        years.write_record(&row)?;
    }
    years.flush()?;

    let mut cities = csv::Writer::from_path(&files.cities)?;
    cities.write_record(city_titles())?;
    for row in city_rows(dynamics) {
        cities.write_record(&row)?;
    }
    cities.flush()?;

    let report = JsonReport {
        selected_vacancy,
        dynamics,
    };
    std::fs::write(&files.json, serde_json::to_string_pretty(&report)?)?;

    info!("Reports written to {}", dir.display());
    Ok(files)
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
