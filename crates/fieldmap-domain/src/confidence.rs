//! Confidence breakdown for a scored (source, target) pair

use serde::{Deserialize, Serialize};

/// Round a score to 3 decimal places
pub fn round_score(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Clamp a score into [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Four-component score and its weighted total
///
/// Every component is a fraction in [0, 1] rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// Lexical name similarity
    pub name: f64,

    /// Declared type compatibility
    #[serde(rename = "type")]
    pub type_score: f64,

    /// Semantic tag overlap
    pub semantic: f64,

    /// Nesting depth proximity
    pub structural: f64,

    /// Weighted sum of the components, clamped to [0, 1]
    pub total: f64,
}

impl ConfidenceBreakdown {
    /// Build a breakdown, clamping and rounding every component
    pub fn new(name: f64, type_score: f64, semantic: f64, structural: f64, total: f64) -> Self {
        Self {
            name: round_score(clamp_unit(name)),
            type_score: round_score(clamp_unit(type_score)),
            semantic: round_score(clamp_unit(semantic)),
            structural: round_score(clamp_unit(structural)),
            total: round_score(clamp_unit(total)),
        }
    }
}
