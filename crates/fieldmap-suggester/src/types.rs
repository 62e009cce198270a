//! Request and response types for the mapping endpoint

use fieldmap_domain::{FeedbackEntry, MappingSuggestion, SourceField, TargetField};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Strategy value that skips the AI call
pub const RULE_BASED: &str = "rule-based";

/// Strategy value reported when AI suggestions were used
pub const AI: &str = "ai";

/// Treat an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound request: either a scoring request or a feedback submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    /// Fields of the external schema
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_fields: Vec<SourceField>,

    /// Fields of the destination schema
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_fields: Vec<TargetField>,

    /// Known source name -> target pairings; forwarded to the AI prompt only
    #[serde(default, deserialize_with = "null_as_default")]
    pub existing_mappings: BTreeMap<String, String>,

    /// Feedback entries; a non-empty list turns this into a feedback submission
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: Vec<FeedbackEntry>,

    /// Caller-supplied request identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Requested strategy; `"rule-based"` skips the AI call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Model override for the AI call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl MappingRequest {
    /// Create a scoring request
    pub fn new(source_fields: Vec<SourceField>, target_fields: Vec<TargetField>) -> Self {
        Self {
            source_fields,
            target_fields,
            ..Default::default()
        }
    }

    /// Whether this request carries feedback rather than fields to score
    pub fn is_feedback(&self) -> bool {
        !self.feedback.is_empty()
    }

    /// Whether the caller asked for rule-based scoring only
    pub fn wants_rule_based(&self) -> bool {
        self.strategy
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(RULE_BASED))
    }
}

/// Which path produced the suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// AI suggestions merged with rule-based fallback for uncovered sources
    #[serde(rename = "ai")]
    Ai,

    /// Rule-based ranking only
    #[serde(rename = "rule-based")]
    RuleBased,
}

impl Strategy {
    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Ai => AI,
            Strategy::RuleBased => RULE_BASED,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to a scoring response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Number of source fields in the request
    pub source_count: usize,

    /// Number of target fields in the request
    pub target_count: usize,

    /// Path that produced the suggestions
    pub strategy: Strategy,

    /// Human-readable outcome, including the fallback reason if any
    pub message: String,

    /// Model label (`"rule-based"` when no model is involved)
    pub model: String,

    /// Request identifier (supplied or generated)
    pub request_id: String,

    /// User prompt built for the AI call
    pub prompt: String,
}

/// Scoring response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResponse {
    /// One entry per source field, in request order
    pub suggestions: Vec<MappingSuggestion>,

    /// Response metadata
    pub meta: ResponseMeta,
}

/// Metadata attached to a feedback response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMeta {
    /// Request identifier (supplied or generated)
    pub request_id: String,

    /// Strategy label from the request, or `"unknown"`
    pub strategy: String,

    /// Model label from the request, or `"unknown"`
    pub model: String,
}

/// Feedback submission response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    /// Always `"ok"`; failures are reported as errors instead
    pub status: String,

    /// Whether the entries were persisted
    pub feedback_stored: bool,

    /// Stored count, or the submitted count when nothing was stored
    pub feedback_count: usize,

    /// Why nothing was stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Response metadata
    pub meta: FeedbackMeta,
}

/// Either response shape of the mapping endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    /// Scoring path
    Suggestions(MappingResponse),

    /// Feedback path
    Feedback(FeedbackResponse),
}
