//! Mapping service: request validation, AI attempt, fallback and feedback

use crate::error::SuggestError;
use crate::fallback::FallbackReason;
use crate::merger::{ai_covered_sources, merge_suggestions};
use crate::parser::parse_ai_response;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use crate::types::{
    FeedbackMeta, FeedbackResponse, MappingRequest, MappingResponse, ResponseMeta, ServiceResponse,
    Strategy, RULE_BASED,
};
use fieldmap_domain::feedback::UNKNOWN_LABEL;
use fieldmap_domain::traits::{CompletionProvider, CompletionRequest, FeedbackStore};
use fieldmap_domain::{AiMapping, FeedbackRecord, MappingSuggestion};
use fieldmap_scoring::CandidateRanker;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// Reason reported when feedback arrives and no store is configured
pub const STORE_NOT_CONFIGURED: &str = "feedback store not configured";

/// Message shown when a caller omits the required field lists
pub const MISSING_FIELDS: &str = "sourceFields and targetFields are required and must be non-empty arrays";

/// Where the AI step ended up
enum AiPhase {
    /// AI was never called
    Skipped(FallbackReason),

    /// AI was called; `Err` means the response could not be used
    Attempted(Result<Vec<AiMapping>, FallbackReason>),
}

/// The mapping service ties the ranker, the optional completion provider and
/// the optional feedback store together
pub struct MappingService<P, S>
where
    P: CompletionProvider,
    S: FeedbackStore,
{
    provider: Option<Arc<P>>,
    store: Option<Arc<Mutex<S>>>,
    ranker: CandidateRanker,
}

impl<P, S> MappingService<P, S>
where
    P: CompletionProvider,
    S: FeedbackStore,
{
    /// Create a rule-based service with no collaborators
    pub fn new(ranker: CandidateRanker) -> Self {
        Self {
            provider: None,
            store: None,
            ranker,
        }
    }

    /// Attach a completion provider
    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Attach a feedback store
    pub fn with_store(mut self, store: S) -> Self {
        self.store = Some(Arc::new(Mutex::new(store)));
        self
    }

    /// Whether a completion provider is configured
    pub fn ai_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Whether a feedback store is configured
    pub fn feedback_store_configured(&self) -> bool {
        self.store.is_some()
    }

    /// The ranker used for rule-based scoring
    pub fn ranker(&self) -> &CandidateRanker {
        &self.ranker
    }

    /// Handle a request on either path
    ///
    /// A non-empty `feedback` list short-circuits to persistence before any
    /// field validation.
    pub async fn handle(&self, request: MappingRequest) -> Result<ServiceResponse, SuggestError> {
        if request.is_feedback() {
            return self.record_feedback(&request).map(ServiceResponse::Feedback);
        }
        self.suggest(request).await.map(ServiceResponse::Suggestions)
    }

    /// Score a request, trying AI first when possible
    pub async fn suggest(&self, request: MappingRequest) -> Result<MappingResponse, SuggestError> {
        if request.source_fields.is_empty() || request.target_fields.is_empty() {
            return Err(SuggestError::InvalidRequest(MISSING_FIELDS.to_string()));
        }

        let request_id = request.request_id.clone().unwrap_or_else(new_request_id);
        let model = self.model_label(&request);
        let prompt = PromptBuilder::new(&request.source_fields, &request.target_fields)
            .with_existing_mappings(&request.existing_mappings)
            .build();

        info!(
            "Suggesting mappings for request {}: {} sources x {} targets",
            request_id,
            request.source_fields.len(),
            request.target_fields.len()
        );

        let phase = match (&self.provider, request.wants_rule_based()) {
            (_, true) => AiPhase::Skipped(FallbackReason::RuleBasedRequested),
            (None, false) => AiPhase::Skipped(FallbackReason::NotConfigured),
            (Some(provider), false) => {
                let completion = CompletionRequest {
                    system: SYSTEM_PROMPT.to_string(),
                    user: prompt.clone(),
                    model: request.model.clone(),
                };
                AiPhase::Attempted(request_ai_mappings(provider.as_ref(), &completion).await)
            }
        };

        let (suggestions, strategy, message) = match phase {
            AiPhase::Attempted(Ok(ai_mappings)) => {
                let covered = ai_covered_sources(&request.source_fields, &ai_mappings);
                info!(
                    "Request {}: AI mappings for {}/{} sources",
                    request_id,
                    covered,
                    request.source_fields.len()
                );
                let suggestions = merge_suggestions(
                    &request.source_fields,
                    &request.target_fields,
                    &ai_mappings,
                    &self.ranker,
                );
                let message = format!(
                    "AI suggestions for {} of {} source fields; rule-based ranking for the rest",
                    covered,
                    request.source_fields.len()
                );
                (suggestions, Strategy::Ai, message)
            }
            AiPhase::Attempted(Err(reason)) => {
                warn!(
                    "Request {}: falling back to rule-based scoring: {} ({})",
                    request_id,
                    reason,
                    reason.detail().unwrap_or("no detail")
                );
                (self.rule_based(&request), Strategy::RuleBased, fallback_message(&reason))
            }
            AiPhase::Skipped(reason) => {
                debug!("Request {}: AI skipped: {}", request_id, reason);
                (self.rule_based(&request), Strategy::RuleBased, fallback_message(&reason))
            }
        };

        Ok(MappingResponse {
            suggestions,
            meta: ResponseMeta {
                source_count: request.source_fields.len(),
                target_count: request.target_fields.len(),
                strategy,
                message,
                model,
                request_id,
                prompt,
            },
        })
    }

    /// Persist feedback entries in one batch
    ///
    /// Without a store this succeeds with `feedbackStored: false`.
    pub fn record_feedback(&self, request: &MappingRequest) -> Result<FeedbackResponse, SuggestError> {
        let request_id = request.request_id.clone().unwrap_or_else(new_request_id);
        let meta = FeedbackMeta {
            request_id: request_id.clone(),
            strategy: request.strategy.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            model: request.model.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        };

        let Some(store) = &self.store else {
            warn!(
                "Request {}: dropping {} feedback entries: {}",
                request_id,
                request.feedback.len(),
                STORE_NOT_CONFIGURED
            );
            return Ok(FeedbackResponse {
                status: "ok".to_string(),
                feedback_stored: false,
                feedback_count: request.feedback.len(),
                reason: Some(STORE_NOT_CONFIGURED.to_string()),
                meta,
            });
        };

        let created_at = unix_now();
        let records: Vec<FeedbackRecord> = request
            .feedback
            .iter()
            .cloned()
            .map(|entry| {
                FeedbackRecord::from_entry(
                    entry,
                    Some(request_id.as_str()),
                    request.strategy.as_deref(),
                    request.model.as_deref(),
                    created_at,
                )
            })
            .collect();

        let stored = {
            let mut store = store
                .lock()
                .map_err(|_| SuggestError::Internal("Feedback store lock poisoned".to_string()))?;
            store.append_feedback(&records).map_err(|e| {
                error!("Request {}: failed to store feedback: {}", request_id, e);
                SuggestError::Feedback(e.to_string())
            })?
        };

        info!("Request {}: stored {} feedback entries", request_id, stored);

        Ok(FeedbackResponse {
            status: "ok".to_string(),
            feedback_stored: true,
            feedback_count: stored,
            reason: None,
            meta,
        })
    }

    fn rule_based(&self, request: &MappingRequest) -> Vec<MappingSuggestion> {
        merge_suggestions(&request.source_fields, &request.target_fields, &[], &self.ranker)
    }

    /// Requested model, else the provider's, else `"rule-based"`
    fn model_label(&self, request: &MappingRequest) -> String {
        request
            .model
            .clone()
            .or_else(|| self.provider.as_ref().map(|p| p.model_name().to_string()))
            .unwrap_or_else(|| RULE_BASED.to_string())
    }
}

/// One provider call, no retries
async fn request_ai_mappings<P: CompletionProvider>(
    provider: &P,
    completion: &CompletionRequest,
) -> Result<Vec<AiMapping>, FallbackReason> {
    let response = provider
        .complete(completion)
        .await
        .map_err(|e| FallbackReason::Provider(e.to_string()))?;

    debug!("AI response length: {} chars", response.len());
    parse_ai_response(&response)
}

fn fallback_message(reason: &FallbackReason) -> String {
    format!("Rule-based suggestions: {}", reason)
}

fn new_request_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
