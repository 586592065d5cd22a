//! Shared building blocks for vacancy statistics.
//!
//! Typed vacancy records and their normalizer, the currency conversion table,
//! the Russian display vocabulary, formatting helpers, CLI settings and the
//! error type used by every crate in the workspace.

pub mod currency;
pub mod error;
pub mod formatting;
pub mod models;
pub mod normalizer;
pub mod settings;
pub mod vocabulary;

pub use error::{Result, VacancyError};
