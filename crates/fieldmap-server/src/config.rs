//! Configuration file parsing for the server.
//!
//! Loads the bind address, the optional completion provider and feedback
//! store sections, and the scoring weights from a TOML file.

use fieldmap_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_TEMPERATURE};
use fieldmap_llm::OpenAiConfig;
use fieldmap_scoring::{ScoringWeights, WeightsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Scoring weights are unusable
    #[error("Invalid [scoring] section: {0}")]
    Weights(#[from] WeightsError),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Completion provider; absent means rule-based only
    #[serde(default)]
    pub llm: Option<LlmSection>,

    /// Feedback store; absent means feedback is acknowledged but not stored
    #[serde(default)]
    pub store: Option<StoreSection>,

    /// Scoring weights
    #[serde(default)]
    pub scoring: ScoringWeights,
}

/// `[llm]` section
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Inline API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Client timeout in seconds; none means the HTTP client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[store]` section
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// SQLite database path (`:memory:` for a throwaway store)
    pub path: PathBuf,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl LlmSection {
    /// API key from `api_key`, else from the `api_key_env` variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Some(key.to_string());
        }
        self.api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;

        if let Some(llm) = &config.llm {
            if llm.model.trim().is_empty() {
                return Err(ConfigError::MissingField("llm.model".to_string()));
            }
        }
        config.scoring.validate()?;

        Ok(config)
    }

    /// Default configuration: local bind, no AI, no store
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            llm: None,
            store: None,
            scoring: ScoringWeights::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Provider settings, if an `[llm]` section exists and its key resolves
    pub fn openai_config(&self) -> Option<OpenAiConfig> {
        let llm = self.llm.as_ref()?;
        let Some(api_key) = llm.resolve_api_key() else {
            warn!("[llm] section present but no API key could be resolved; AI suggestions disabled");
            return None;
        };

        let mut openai = OpenAiConfig::new(llm.endpoint.clone(), llm.model.clone(), api_key);
        openai.temperature = llm.temperature;
        openai.timeout = llm.timeout_secs.map(Duration::from_secs);
        Some(openai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(config.llm.is_none());
        assert!(config.store.is_none());
        assert_eq!(config.scoring, ScoringWeights::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [llm]
            endpoint = "http://localhost:4000/v1"
            model = "gpt-4o-mini"
            api_key = "sk-test"
            temperature = 0.1
            timeout_secs = 30

            [store]
            path = "feedback.db"

            [scoring]
            name = 0.5
            type = 0.3
            semantic = 0.1
            structural = 0.1
        "#;

        let config = ServerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.store.unwrap().path, PathBuf::from("feedback.db"));
        assert_eq!(config.scoring.name, 0.5);

        let openai = ServerConfig::from_toml_str(toml).unwrap().openai_config().unwrap();
        assert_eq!(openai.endpoint, "http://localhost:4000/v1");
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.temperature, 0.1);
        assert_eq!(openai.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_minimal_llm_section_uses_defaults() {
        let config = ServerConfig::from_toml_str("[llm]\nmodel = \"gpt-4o-mini\"\napi_key = \"k\"").unwrap();
        let llm = config.llm.unwrap();
        assert_eq!(llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(llm.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(llm.timeout_secs, None);
    }

    #[test]
    fn test_api_key_from_environment() {
        std::env::set_var("FIELDMAP_TEST_KEY_PRESENT", "sk-env");
        let config = ServerConfig::from_toml_str(
            "[llm]\nmodel = \"m\"\napi_key_env = \"FIELDMAP_TEST_KEY_PRESENT\"",
        )
        .unwrap();
        assert_eq!(config.openai_config().unwrap().api_key, "sk-env");
    }

    #[test]
    fn test_unresolved_api_key_disables_ai() {
        let config = ServerConfig::from_toml_str(
            "[llm]\nmodel = \"m\"\napi_key_env = \"FIELDMAP_TEST_KEY_DEFINITELY_UNSET\"",
        )
        .unwrap();
        assert!(config.llm.is_some());
        assert!(config.openai_config().is_none());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let result = ServerConfig::from_toml_str("[scoring]\nname = -1.0");
        assert!(matches!(result, Err(ConfigError::Weights(_))));
    }

    #[test]
    fn test_empty_model_rejected() {
        let result = ServerConfig::from_toml_str("[llm]\nmodel = \"\"");
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }
}
