use clap::Parser;
use std::path::PathBuf;

use crate::models::{IngestPolicy, QueryOptions};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Salary and vacancy statistics from job-posting exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vacancy-stats",
    about = "Salary and vacancy statistics from job-posting exports",
    version
)]
pub struct Settings {
    /// Vacancy CSV file, or a directory of CSV chunks
    #[arg(long, env = "VACANCY_STATS_FILE")]
    pub file: PathBuf,

    /// View mode
    #[arg(long, default_value = "statistics", value_parser = ["statistics", "vacancies", "split"])]
    pub view: String,

    /// Job title substring used for the selected-vacancy statistics
    #[arg(long, default_value = "")]
    pub profession: String,

    /// Vacancy filter, e.g. "Навыки: Python, Agile"
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Field to sort vacancies by
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Reverse sort order (Да / Нет)
    #[arg(long, default_value = "")]
    pub reverse: String,

    /// Row range to display, e.g. "10 20"
    #[arg(long, default_value = "")]
    pub rows: String,

    /// Columns to display, e.g. "Название, Оклад"
    #[arg(long, default_value = "")]
    pub columns: String,

    /// Directory for exported reports
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    pub no_report: bool,

    /// Output directory of the split view
    #[arg(long, default_value = "vacancies_by_year")]
    pub split_dir: PathBuf,

    /// Skip malformed records instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// Print plain-text tables instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Vacancy-table options as typed on the command line.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            filter: self.filter.clone(),
            sort_field: self.sort.clone(),
            reverse: self.reverse.clone(),
            row_range: self.rows.clone(),
            columns: self.columns.clone(),
        }
    }

    pub fn ingest_policy(&self) -> IngestPolicy {
        if self.skip_malformed {
            IngestPolicy::SkipMalformed
        } else {
            IngestPolicy::AbortOnFirst
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
