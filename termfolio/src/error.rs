//! Error types for the terminal front-end
//!
//! Wraps service layer errors and terminal/IO errors for unified error
//! handling in the drivers.

use thiserror::Error;

/// Front-end errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libtermfolio::FolioError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),

    /// Event handling error
    #[error("Event error: {0}")]
    Event(String),
}

impl TuiError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Service(e) => e.exit_code(),
            _ => 1,
        }
    }
}

impl From<libtermfolio::SourceError> for TuiError {
    fn from(err: libtermfolio::SourceError) -> Self {
        TuiError::Service(err.into())
    }
}

/// Result type for front-end operations
pub type Result<T> = std::result::Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use libtermfolio::error::ConfigError;

    #[test]
    fn test_exit_code_follows_service_error() {
        let err = TuiError::from(libtermfolio::FolioError::from(ConfigError::MissingField("x".into())));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(TuiError::Event("closed".into()).exit_code(), 1);
    }
}
