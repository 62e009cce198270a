//! Fieldmap Suggester
//!
//! Turns a mapping request into per-source suggestions, optionally assisted
//! by a language model, and records reviewer feedback.
//!
//! # Architecture
//!
//! ```text
//! Request ─┬─ feedback? ──> FeedbackStore
//!          └─ fields ──> (CompletionProvider → parser → merger) | CandidateRanker ──> Response
//! ```
//!
//! Any AI failure (no provider, network, bad JSON, missing `mappings`) is a
//! [`FallbackReason`], not an error: the request is answered by the
//! rule-based ranker and the reason is reported in `meta.message`.
//!
//! # Example Usage
//!
//! ```no_run
//! use fieldmap_domain::{SourceField, TargetField};
//! use fieldmap_llm::MockProvider;
//! use fieldmap_scoring::CandidateRanker;
//! use fieldmap_store::SqliteStore;
//! use fieldmap_suggester::{MappingRequest, MappingService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service: MappingService<MockProvider, SqliteStore> =
//!     MappingService::new(CandidateRanker::default());
//!
//! let request = MappingRequest::new(
//!     vec![SourceField::new("customer_email", "string")],
//!     vec![TargetField::new("email", "billTo.email", "string", "order")],
//! );
//!
//! let response = service.suggest(request).await?;
//! println!("{} via {}", response.suggestions.len(), response.meta.strategy);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod fallback;
mod orchestrator;
mod types;

pub mod merger;
pub mod parser;
pub mod prompt;


pub use error::SuggestError;
pub use fallback::FallbackReason;
pub use merger::{merge_suggestions, resolve_target, TargetResolution, AI_RATIONALE};
pub use orchestrator::{MappingService, MISSING_FIELDS, STORE_NOT_CONFIGURED};
pub use parser::parse_ai_response;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
pub use types::{
    FeedbackMeta, FeedbackResponse, MappingRequest, MappingResponse, ResponseMeta, ServiceResponse,
    Strategy, AI, RULE_BASED,
};
