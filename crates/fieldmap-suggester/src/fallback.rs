//! Why a request fell back to rule-based scoring

use thiserror::Error;

/// Reason the AI path was skipped or abandoned
///
/// The `Display` text is caller-facing and carries no provider detail;
/// the detail fields are for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    /// No completion provider is configured
    #[error("AI provider not configured")]
    NotConfigured,

    /// The request asked for rule-based scoring
    #[error("rule-based strategy requested")]
    RuleBasedRequested,

    /// The provider call failed (network, HTTP status, envelope)
    #[error("AI provider request failed")]
    Provider(String),

    /// The completion was not valid JSON
    #[error("AI response was not valid JSON")]
    MalformedJson(String),

    /// The completion had no `mappings` array
    #[error("AI response did not contain a mappings array")]
    MissingMappings,
}

impl FallbackReason {
    /// Log detail, when the variant carries any
    pub fn detail(&self) -> Option<&str> {
        match self {
            FallbackReason::Provider(detail) | FallbackReason::MalformedJson(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hides_detail() {
        let reason = FallbackReason::Provider("HTTP 401: invalid api key sk-...".to_string());
        assert_eq!(reason.to_string(), "AI provider request failed");
        assert_eq!(reason.detail(), Some("HTTP 401: invalid api key sk-..."));
        assert_eq!(FallbackReason::NotConfigured.detail(), None);
    }
}
