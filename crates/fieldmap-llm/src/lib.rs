//! Fieldmap LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `fieldmap-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat-completion API
//!
//! # Examples
//!
//! ```
//! use fieldmap_domain::traits::{CompletionProvider, CompletionRequest};
//! use fieldmap_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"mappings": []}"#);
//! let request = CompletionRequest {
//!     system: "system".to_string(),
//!     user: "user".to_string(),
//!     model: None,
//! };
//! let result = provider.complete(&request).await.unwrap();
//! assert_eq!(result, r#"{"mappings": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use fieldmap_domain::traits::{CompletionProvider, CompletionRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Invalid response envelope from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider is missing required configuration
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Model name reported by the mock provider
pub const MOCK_MODEL: &str = "mock";

#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured completions without making any network calls.
/// Specific replies are keyed by a substring of the user message.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a mock that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Content(response.into()))
    }

    /// Create a mock whose every call fails with a communication error
    ///
    /// Simulates an unreachable provider.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Answer requests whose user message contains `needle` with `response`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(needle.into(), MockReply::Content(response.into()));
        }
    }

    /// Fail requests whose user message contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(needle.into(), MockReply::Error("Mock error".to_string()));
        }
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|c| *c).unwrap_or(0)
    }

    /// The most recent request received
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"mappings": []}"#)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        MOCK_MODEL
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| {
                replies
                    .iter()
                    .find(|(needle, _)| request.user.contains(needle.as_str()))
                    .map(|(_, reply)| reply.clone())
            })
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Content(content) => Ok(content),
            MockReply::Error(message) => Err(LlmError::Communication(message)),
        }
    }
}
