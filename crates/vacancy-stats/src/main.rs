mod bootstrap;

use anyhow::Result;
use vacancy_core::normalizer::RecordNormalizer;
use vacancy_core::settings::Settings;
use vacancy_core::vocabulary::NOTHING_FOUND;
use vacancy_data::query::{DisplayRecord, QueryOutcome, VacancyQuery};
use vacancy_data::reader;
use vacancy_data::report;
use vacancy_data::statistics::StatisticsEngine;
use vacancy_ui::app::{App, ViewMode};
use vacancy_ui::statistics_view::{self, StatisticsData};
use vacancy_ui::table_view;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Vacancy Stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Theme: {}",
        settings.file.display(),
        settings.view,
        settings.theme
    );

    match settings.view.as_str() {
        "split" => run_split(&settings),
        "vacancies" => run_vacancies(&settings).await,
        "statistics" => run_statistics(&settings).await,
        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
            Ok(())
        }
    }
}

// ── Views ──────────────────────────────────────────────────────────────────────

fn run_split(settings: &Settings) -> Result<()> {
    let written = reader::split_by_year(&settings.file, &settings.split_dir)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn run_vacancies(settings: &Settings) -> Result<()> {
    let query = match VacancyQuery::parse(&settings.query_options()) {
        Ok(query) => query,
        Err(e) if e.is_query_error() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let dataset = reader::load(&settings.file)?;
    let records: Vec<DisplayRecord> = dataset.records.iter().map(DisplayRecord::from_raw).collect();
    let outcome = query.apply(&records);

    if settings.plain {
        match &outcome {
            QueryOutcome::Rows(view) => println!("{}", table_view::plain_table(view)),
            QueryOutcome::NothingFound => println!("{NOTHING_FOUND}"),
        }
        return Ok(());
    }

    App::new(&settings.theme, ViewMode::Vacancies)
        .run_table(outcome)
        .await?;
    Ok(())
}

async fn run_statistics(settings: &Settings) -> Result<()> {
    let dataset = reader::load(&settings.file)?;

    let mut engine = StatisticsEngine::new(settings.profession.clone(), RecordNormalizer::default());
    let ingested = engine.ingest(&dataset.records, settings.ingest_policy())?;
    if !ingested.is_clean() {
        tracing::warn!(
            "{} of {} records skipped as malformed",
            ingested.skipped.len(),
            dataset.len()
        );
    }

    let dynamics = engine.finalize().clone();

    if !settings.no_report {
        let dir = bootstrap::resolve_report_dir(settings.report_dir.as_deref());
        let files = report::write_reports(&dir, &dynamics, &settings.profession)?;
        tracing::info!(
            "Reports written: {}, {}, {}",
            files.years.display(),
            files.cities.display(),
            files.json.display()
        );
    }

    let data = StatisticsData {
        selected_vacancy: settings.profession.clone(),
        total: engine.total_count(),
        dynamics,
    };

    if settings.plain {
        print!("{}", statistics_view::plain_statistics(&data));
        return Ok(());
    }

    App::new(&settings.theme, ViewMode::Statistics)
        .run_statistics(data)
        .await?;
    Ok(())
}
