//! CSV discovery, loading and per-year splitting of vacancy exports.
//!
//! A vacancy export is a UTF-8 CSV file (optionally with a BOM) whose first
//! row holds the column titles. Every following row becomes a [`RawRecord`]
//! keyed by those titles.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use vacancy_core::models::{fields, RawRecord};
use vacancy_core::{Result, VacancyError};

const BOM: char = '\u{feff}';

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Column titles and the complete rows of one or more CSV files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub titles: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read one vacancy CSV file.
///
/// Rows whose length differs from the title count, or that contain an empty
/// cell, are dropped.
///
/// # Errors
///
/// * [`VacancyError::FileRead`] when the file cannot be read.
/// * [`VacancyError::NoData`] when the file has no title row.
/// * [`VacancyError::Csv`] when the CSV syntax is broken.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let text = read_text(path)?;
    let mut reader = csv_reader(&text);
    let mut rows = reader.records();

    let titles: Vec<String> = match rows.next() {
        Some(header) => header?.iter().map(str::to_string).collect(),
        None => return Err(VacancyError::NoData(path.to_path_buf())),
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (line, row) in rows.enumerate() {
        let row = row?;
        if row.len() != titles.len() || row.iter().any(str::is_empty) {
            debug!(row = line + 1, "Dropping incomplete vacancy row");
            dropped += 1;
            continue;
        }
        records.push(
            titles
                .iter()
                .zip(row.iter())
                .map(|(title, value)| (title.as_str(), value))
                .collect(),
        );
    }

    debug!(
        "Read {} vacancies ({} dropped) from {}",
        records.len(),
        dropped,
        path.display()
    );
    Ok(Dataset { titles, records })
}

/// Find all `.csv` files recursively under `dir`, sorted by path.
pub fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read and concatenate every CSV file under `dir`.
///
/// Titles are taken from the first file; rows keep the titles of the file
/// they came from.
pub fn read_directory(dir: &Path) -> Result<Dataset> {
    let files = find_csv_files(dir);
    if files.is_empty() {
        return Err(VacancyError::NoData(dir.to_path_buf()));
    }

    let mut merged = Dataset::default();
    for file in &files {
        let dataset = read_dataset(file)?;
        if merged.titles.is_empty() {
            merged.titles = dataset.titles;
        } else if merged.titles != dataset.titles {
            warn!("Column titles of {} differ from the first file", file.display());
        }
        merged.records.extend(dataset.records);
    }

    debug!("Read {} vacancies from {} files", merged.len(), files.len());
    Ok(merged)
}

/// Read `path` as a single file, or as a directory of CSV chunks.
pub fn load(path: &Path) -> Result<Dataset> {
    let dataset = if path.is_dir() {
        read_directory(path)?
    } else {
        read_dataset(path)?
    };
    info!("Loaded {} vacancies from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Split a vacancy CSV into one `<year>.csv` file per publication year.
///
/// The year is the first four characters of the `published_at` column. Each
/// output file repeats the title row. Rows are copied verbatim; rows without
/// a readable year are skipped. Returns the written paths, sorted.
pub fn split_by_year(path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let text = read_text(path)?;
    let mut reader = csv_reader(&text);
    let mut rows = reader.records();

    let titles = match rows.next() {
        Some(header) => header?,
        None => return Err(VacancyError::NoData(path.to_path_buf())),
    };
    let year_column = titles
        .iter()
        .position(|title| title == fields::PUBLISHED_AT)
        .ok_or_else(|| VacancyError::MissingField(fields::PUBLISHED_AT.to_string()))?;

    std::fs::create_dir_all(out_dir)?;

    let mut writers: HashMap<String, csv::Writer<File>> = HashMap::new();
    let mut paths = Vec::new();
    for (line, row) in rows.enumerate() {
        let row = row?;
        let Some(year) = row
            .get(year_column)
            .and_then(|value| value.get(..4))
            .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
        else {
            debug!(row = line + 1, "Skipping row without a publication year");
            continue;
        };

        let writer = match writers.entry(year.to_string()) {
            std::collections::hash_map::Entry::Occupied(slot) => slot.into_mut(),
            std::collections::hash_map::Entry::Vacant(slot) => {
                let file_path = out_dir.join(format!("{year}.csv"));
                let mut writer = csv::Writer::from_path(&file_path)?;
                writer.write_record(&titles)?;
                paths.push(file_path);
                slot.insert(writer)
            }
        };
        writer.write_record(&row)?;
    }

    for writer in writers.values_mut() {
        writer.flush()?;
    }

    paths.sort();
    info!(
        "Split {} into {} yearly files under {}",
        path.display(),
        paths.len(),
        out_dir.display()
    );
    Ok(paths)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_text(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|source| VacancyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
