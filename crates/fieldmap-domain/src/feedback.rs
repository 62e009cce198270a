//! Human feedback on proposed mappings
//!
//! Feedback is append-only: entries are persisted verbatim and never read
//! back by the scoring pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when neither the entry nor the request carries a strategy/model
pub const UNKNOWN_LABEL: &str = "unknown";

/// Unique identifier for a persisted feedback record (UUIDv7)
///
/// UUIDv7 keeps records chronologically sortable without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackId(u128);

impl FeedbackId {
    /// Generate a new UUIDv7-based identifier
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse an identifier from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid feedback id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for FeedbackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// An accept/reject decision on one proposed mapping, as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    /// Source field name
    pub source: String,

    /// Target field path or name
    pub target: String,

    /// Whether the mapping was accepted
    pub accepted: bool,

    /// Confidence shown to the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Strategy that produced the mapping ("ai" or "rule-based")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Request the mapping was produced by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Model that produced the mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Target document type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_document: Option<String>,

    /// Rationale shown to the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Vec<String>>,
}

/// A feedback entry as persisted by the store
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    /// Generated identifier
    pub id: FeedbackId,

    /// The submitted entry, verbatim
    pub entry: FeedbackEntry,

    /// Resolved strategy label
    pub strategy: String,

    /// Resolved model label
    pub model: String,

    /// Resolved request identifier
    pub request_id: Option<String>,

    /// Server timestamp (seconds since Unix epoch)
    pub created_at: u64,
}

impl FeedbackRecord {
    /// Build a record, resolving labels from the entry first, then the request
    pub fn from_entry(
        entry: FeedbackEntry,
        request_id: Option<&str>,
        request_strategy: Option<&str>,
        request_model: Option<&str>,
        created_at: u64,
    ) -> Self {
        let strategy = entry
            .strategy
            .as_deref()
            .or(request_strategy)
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();
        let model = entry
            .model
            .as_deref()
            .or(request_model)
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();
        let request_id = entry
            .request_id
            .clone()
            .or_else(|| request_id.map(str::to_string));

        Self {
            id: FeedbackId::new(),
            entry,
            strategy,
            model,
            request_id,
            created_at,
        }
    }
}
