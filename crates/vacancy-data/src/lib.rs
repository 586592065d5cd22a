//! Data layer for vacancy statistics.
//!
//! Reads and splits vacancy CSV exports, folds vacancies into per-year and
//! per-city aggregates, derives the dynamics tables, runs vacancy-table
//! queries and writes report files.

pub mod aggregator;
pub mod query;
pub mod reader;
pub mod report;
pub mod statistics;

pub use vacancy_core as core;
