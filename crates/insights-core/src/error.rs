use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Content Insights.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The source file could not be opened or inspected.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited reader rejected the file (bad quoting, invalid UTF-8, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column \"{column}\" in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A metric value is not a non-negative number once separators are removed.
    #[error("Malformed numeric value {value:?} in column \"{column}\" at line {line}")]
    MalformedNumericField {
        line: u64,
        column: String,
        value: String,
    },

    /// A date value is not a valid `YYYY-MM-DD` calendar date.
    #[error("Malformed date value {value:?} in column \"{column}\" at line {line}")]
    MalformedDateField {
        line: u64,
        column: String,
        value: String,
    },

    /// No source file was given and none was found in the default locations.
    #[error("Data file not found: {0}")]
    DataPathNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InsightsError {
    /// `true` for the errors that describe bad source data rather than an
    /// environment problem.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. }
                | Self::MalformedNumericField { .. }
                | Self::MalformedDateField { .. }
                | Self::Csv(_)
        )
    }
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;
