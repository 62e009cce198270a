//! OpenAI-compatible chat-completion provider
//!
//! Works against any endpoint exposing `POST {endpoint}/chat/completions`
//! with the OpenAI request/response envelope. The provider makes exactly one
//! attempt per call; callers decide what a failure means.
//!
//! # Examples
//!
//! ```no_run
//! use fieldmap_llm::{OpenAiConfig, OpenAiProvider};
//!
//! let config = OpenAiConfig::new("https://api.openai.com/v1", "gpt-4o-mini", "sk-...");
//! let provider = OpenAiProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use fieldmap_domain::traits::{CompletionProvider, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Longest error body kept in [`LlmError::Http`]
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`OpenAiProvider`]
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub endpoint: String,

    /// Default model
    pub model: String,

    /// Bearer token
    pub api_key: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Client-side timeout; none means the HTTP client default
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    /// Create a config with the default temperature and no timeout
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }
}

/// Chat-completion provider for OpenAI-compatible APIs
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when the API key or model is empty,
    /// and [`LlmError::Other`] when the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("missing API key".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(LlmError::NotConfigured("missing model".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The completion URL for this provider
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

fn truncate(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat { kind: "json_object" },
        };

        debug!("Requesting completion from {} with model {}", self.completions_url(), model);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: truncate(text),
            });
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
    }
}
