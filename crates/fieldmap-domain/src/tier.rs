//! Confidence status tiers for scored candidates

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the high tier
pub const HIGH_THRESHOLD: f64 = 0.8;

/// Lower bound (inclusive) of the medium tier
pub const MEDIUM_THRESHOLD: f64 = 0.5;

/// Discrete confidence tier of a mapping candidate
///
/// Always derived from a candidate's total score, never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceStatus {
    /// Total >= 0.8
    High,

    /// 0.5 <= total < 0.8
    Medium,

    /// Total < 0.5
    Low,
}

impl ConfidenceStatus {
    /// Classify a total score using crisp cutoffs
    pub fn from_total(total: f64) -> Self {
        if total >= HIGH_THRESHOLD {
            ConfidenceStatus::High
        } else if total >= MEDIUM_THRESHOLD {
            ConfidenceStatus::Medium
        } else {
            ConfidenceStatus::Low
        }
    }

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceStatus::High => "high",
            ConfidenceStatus::Medium => "medium",
            ConfidenceStatus::Low => "low",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(ConfidenceStatus::High),
            "medium" => Some(ConfidenceStatus::Medium),
            "low" => Some(ConfidenceStatus::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfidenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfidenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence status: {}", s))
    }
}
