//! Terminal UI layer for vacancy statistics.
//!
//! Provides themes, the vacancy table view, the statistics view with its bar
//! charts, plain-text renderers for non-interactive output and the event
//! loop built on top of [`ratatui`].

pub mod app;
pub mod statistics_view;
pub mod table_view;
pub mod themes;

pub use vacancy_core as core;
