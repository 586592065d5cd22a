use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the vacancy statistics crates.
#[derive(Error, Debug)]
pub enum VacancyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be read or written.
    #[error("Failed to process CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be serialised or parsed.
    #[error("Failed to process JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A required key is absent from a raw vacancy record.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A numeric or date field of a raw vacancy record could not be parsed.
    #[error("Malformed record: field {field} has value {value:?}")]
    MalformedRecord { field: String, value: String },

    /// The salary currency code has no conversion rate.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A non-empty filter does not contain the `": "` separator.
    #[error("Invalid filter format: {0:?}")]
    InvalidFilterFormat(String),

    /// The filter names a field that cannot be filtered on.
    #[error("Invalid filter field: {0}")]
    InvalidFilterField(String),

    /// The sort option names a field that cannot be sorted on.
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// The reverse-order token is not a recognised yes/no answer.
    #[error("Invalid sort order: {0:?}")]
    InvalidSortOrder(String),

    /// The row range is not one or two positive integers.
    #[error("Invalid row range: {0:?}")]
    InvalidRowRange(String),

    /// A requested output column is not a display field.
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// The input file holds no header row.
    #[error("No data in {0}")]
    NoData(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VacancyError {
    /// Build a [`VacancyError::MalformedRecord`] for `field` holding `value`.
    pub fn malformed(field: &str, value: &str) -> Self {
        Self::MalformedRecord {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// `true` for errors raised while validating query options.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilterFormat(_)
                | Self::InvalidFilterField(_)
                | Self::InvalidSortField(_)
                | Self::InvalidSortOrder(_)
                | Self::InvalidRowRange(_)
                | Self::InvalidColumn(_)
        )
    }
}

/// Convenience alias used throughout the vacancy crates.
pub type Result<T> = std::result::Result<T, VacancyError>;
