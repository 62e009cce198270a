//! Fieldmap Scoring
//!
//! Rule-based scoring of (source, target) field pairs.
//!
//! # Architecture
//!
//! ```text
//! normalize ─┐
//! similarity ┼─> name score ─┐
//! types ─────────────────────┤
//! semantic ──────────────────┼─> CandidateRanker ─> MappingCandidate
//! structural ────────────────┘
//! ```
//!
//! Every scorer is a pure function returning a value in [0, 1]. The
//! [`CandidateRanker`] combines them with [`ScoringWeights`], assigns the
//! confidence status and builds the rationale.
//!
//! # Examples
//!
//! ```
//! use fieldmap_domain::{ConfidenceStatus, SourceField, TargetField};
//! use fieldmap_scoring::CandidateRanker;
//!
//! let ranker = CandidateRanker::default();
//! let source = SourceField::new("sku", "string").with_tags(["identifier"]);
//! let target = TargetField::new("sku", "sku", "string", "product").with_tags(["identifier"]);
//!
//! let candidates = ranker.rank(&source, &[target]);
//! assert_eq!(candidates[0].breakdown.total, 1.0);
//! assert_eq!(candidates[0].status, ConfidenceStatus::High);
//! ```

#![warn(missing_docs)]

pub mod normalize;
pub mod ranker;
pub mod semantic;
pub mod similarity;
pub mod structural;
pub mod types;
pub mod weights;

pub use normalize::name_variants;
pub use ranker::{build_rationale, name_score, CandidateRanker, SubScores, FALLBACK_RATIONALE};
pub use semantic::tag_overlap;
pub use similarity::similarity;
pub use structural::{path_depth, structural_score};
pub use types::type_compatibility;
pub use weights::{ScoringWeights, WeightsError};
