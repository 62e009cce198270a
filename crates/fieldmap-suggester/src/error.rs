//! Error types for the mapping service

use thiserror::Error;

/// Errors surfaced to the caller of the mapping service
///
/// Collaborator failures on the scoring path are not errors; they become a
/// rule-based fallback instead.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Request body is malformed or missing required fields
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Feedback store rejected or failed the write
    #[error("Feedback persistence failed: {0}")]
    Feedback(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for SuggestError {
    fn from(e: serde_json::Error) -> Self {
        SuggestError::InvalidRequest(format!("Request body is not valid JSON: {}", e))
    }
}
