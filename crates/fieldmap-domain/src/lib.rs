//! Fieldmap Domain Layer
//!
//! Core data model shared by every Fieldmap crate: the source and target
//! field descriptions, scored mapping candidates, AI-suggested mappings and
//! human feedback entries. It also defines the trait boundaries for the two
//! external collaborators (completion provider and feedback store).
//!
//! ## Key Concepts
//!
//! - **Source field**: one attribute of the externally supplied schema
//! - **Target field**: one attribute of the destination schema, identified by a dotted path
//! - **Confidence breakdown**: name/type/semantic/structural sub-scores and their weighted total
//! - **Confidence status**: the high/medium/low tier derived from the total
//! - **Feedback entry**: an accept/reject decision, persisted append-only
//!
//! ## Architecture
//!
//! This crate holds no business logic beyond value-object invariants.
//! Scoring lives in `fieldmap-scoring`, orchestration in `fieldmap-suggester`
//! and infrastructure in `fieldmap-llm` / `fieldmap-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod feedback;
pub mod field;
pub mod mapping;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use confidence::ConfidenceBreakdown;
pub use feedback::{FeedbackEntry, FeedbackId, FeedbackRecord};
pub use field::{SourceField, TargetField};
pub use mapping::{AiMapping, MappingCandidate, MappingSuggestion};
pub use tier::ConfidenceStatus;
