//! Mapping candidates, per-source suggestions and AI-suggested pairings

use crate::{ConfidenceBreakdown, ConfidenceStatus, SourceField, TargetField};
use serde::{Deserialize, Serialize};

/// One scored pairing between an implicit source field and a target field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingCandidate {
    /// The proposed target field
    pub target: TargetField,

    /// Score components and total
    pub breakdown: ConfidenceBreakdown,

    /// Tier derived from `breakdown.total`
    pub status: ConfidenceStatus,

    /// Human-readable reasons, never empty
    pub rationale: Vec<String>,
}

impl MappingCandidate {
    /// Build a candidate; the status is derived from the breakdown total
    pub fn new(target: TargetField, breakdown: ConfidenceBreakdown, rationale: Vec<String>) -> Self {
        Self {
            status: ConfidenceStatus::from_total(breakdown.total),
            target,
            breakdown,
            rationale,
        }
    }
}

/// The engine's output unit: one source field and its target candidates
///
/// Candidates keep the order in which they were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// The source field being mapped
    pub source: SourceField,

    /// Target candidates for this source
    pub suggestions: Vec<MappingCandidate>,
}

/// A mapping proposed by the external language model
///
/// Untrusted input: `target` is free text to be resolved against the
/// real target fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMapping {
    /// Source field name
    pub source: String,

    /// Free-text reference to a target field (path or name)
    pub target: String,

    /// Confidence on a 0-100 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Model-provided reasons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Vec<String>>,
}
