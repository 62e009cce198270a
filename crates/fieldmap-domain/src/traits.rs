//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the mapping pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::FeedbackRecord;
use async_trait::async_trait;

/// A system/user message pair sent to a chat-completion model
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System message (instructions and output contract)
    pub system: String,

    /// User message (the data to reason about)
    pub user: String,

    /// Model override; the provider's configured model when `None`
    pub model: Option<String>,
}

/// Trait for chat-completion providers
///
/// Implemented by the infrastructure layer (fieldmap-llm)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::fmt::Display + Send;

    /// Model used when a request does not override it
    fn model_name(&self) -> &str;

    /// Run one completion and return the raw message content
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}

/// Trait for append-only feedback persistence
///
/// Implemented by the infrastructure layer (fieldmap-store)
pub trait FeedbackStore {
    /// Error type for store operations
    type Error: std::fmt::Display;

    /// Append a batch of records, returning how many were stored
    fn append_feedback(&mut self, records: &[FeedbackRecord]) -> Result<usize, Self::Error>;
}
