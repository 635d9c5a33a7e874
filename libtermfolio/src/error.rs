//! Error types for Termfolio

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FolioError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FolioError::InvalidInput(_) => 3,
            FolioError::Config(_) => 2,
            FolioError::Source(_) => 1,
            FolioError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Failure of a background fetch.
///
/// Cloneable so it can ride inside UI events and be kept in a screen's
/// error state for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("GitHub returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request timed out after {}", humantime::format_duration(*.0))]
    Timeout(Duration),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured duration
            SourceError::Network(format!("timed out: {}", err))
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            SourceError::Network(err.to_string())
        }
    }
}
