//! Weights combining the four sub-scores into a total

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default weight of the name score
pub const NAME_WEIGHT: f64 = 0.4;

/// Default weight of the type score
pub const TYPE_WEIGHT: f64 = 0.3;

/// Default weight of the semantic score
pub const SEMANTIC_WEIGHT: f64 = 0.2;

/// Default weight of the structural score
pub const STRUCTURAL_WEIGHT: f64 = 0.1;

/// Invalid weight configuration
#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    /// A weight is negative, NaN or infinite
    #[error("Weight '{0}' must be a finite, non-negative number")]
    Invalid(&'static str),

    /// Every weight is zero
    #[error("At least one weight must be positive")]
    AllZero,
}

/// Weights for the name/type/semantic/structural sub-scores
///
/// Fixed for the lifetime of a ranker; requests cannot override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the name score
    pub name: f64,

    /// Weight of the type score
    #[serde(rename = "type")]
    pub type_weight: f64,

    /// Weight of the semantic score
    pub semantic: f64,

    /// Weight of the structural score
    pub structural: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: NAME_WEIGHT,
            type_weight: TYPE_WEIGHT,
            semantic: SEMANTIC_WEIGHT,
            structural: STRUCTURAL_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Create a weight set, validating every component
    pub fn new(name: f64, type_weight: f64, semantic: f64, structural: f64) -> Result<Self, WeightsError> {
        let weights = Self {
            name,
            type_weight,
            semantic,
            structural,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check that weights are finite, non-negative and not all zero
    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("name", self.name),
            ("type", self.type_weight),
            ("semantic", self.semantic),
            ("structural", self.structural),
        ];
        for (label, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Invalid(label));
            }
        }
        if named.iter().all(|(_, value)| *value == 0.0) {
            return Err(WeightsError::AllZero);
        }
        Ok(())
    }

    /// Weighted sum of the four sub-scores (unclamped)
    pub fn combine(&self, name: f64, type_score: f64, semantic: f64, structural: f64) -> f64 {
        self.name * name
            + self.type_weight * type_score
            + self.semantic * semantic
            + self.structural * structural
    }
}
