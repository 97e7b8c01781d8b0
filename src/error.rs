//! Error types for data collaborators and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by market data, analysis and results-log collaborators.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("no data returned for {0}")]
    EmptyResponse(String),

    #[error("The CSV file '{}' was not found. Please ensure the file exists.", .0.display())]
    ResultsLogMissing(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{0}' not found in results log")]
    MissingColumn(String),

    #[error("invalid page request: {0}")]
    InvalidPage(String),
}

impl DataError {
    /// Whether retrying the request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            DataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
