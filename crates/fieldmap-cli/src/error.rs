//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or service construction error
    #[error("{0}")]
    Server(#[from] fieldmap_server::ServerError),

    /// Mapping service error
    #[error("{0}")]
    Suggest(#[from] fieldmap_suggester::SuggestError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<fieldmap_server::config::ConfigError> for CliError {
    fn from(e: fieldmap_server::config::ConfigError) -> Self {
        CliError::Server(e.into())
    }
}
