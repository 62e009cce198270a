//! HTTP request handlers for the mapping service.
//!
//! Implements the mapping endpoint and health check using axum.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use fieldmap_domain::traits::{CompletionProvider, FeedbackStore};
use fieldmap_suggester::{MappingRequest, MappingService, ServiceResponse, SuggestError};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Path of the mapping endpoint
pub const SUGGEST_PATH: &str = "/api/mappings/suggest";

/// Body returned for every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Shared application state
pub struct AppState<P, S>
where
    P: CompletionProvider,
    S: FeedbackStore,
{
    /// The mapping service
    pub service: Arc<MappingService<P, S>>,
}

impl<P, S> AppState<P, S>
where
    P: CompletionProvider,
    S: FeedbackStore,
{
    /// Wrap a service
    pub fn new(service: MappingService<P, S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<P, S> Clone for AppState<P, S>
where
    P: CompletionProvider,
    S: FeedbackStore,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Whether a completion provider is configured
    pub ai_configured: bool,
    /// Whether a feedback store is configured
    pub feedback_store_configured: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Service-level error
    Suggest(SuggestError),
    /// Method other than POST on the mapping endpoint
    MethodNotAllowed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Suggest(SuggestError::InvalidRequest(msg)) => (StatusCode::BAD_REQUEST, msg),
            AppError::Suggest(e) => {
                error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed; use POST".to_string(),
            ),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<SuggestError> for AppError {
    fn from(e: SuggestError) -> Self {
        AppError::Suggest(e)
    }
}

/// POST /api/mappings/suggest - Score fields or record feedback
///
/// The body is read raw so that any JSON error becomes a 400 with our own
/// error shape.
async fn suggest_mappings<P, S>(
    State(state): State<AppState<P, S>>,
    body: Bytes,
) -> Result<Json<ServiceResponse>, AppError>
where
    P: CompletionProvider + 'static,
    S: FeedbackStore + Send + 'static,
{
    let request: MappingRequest = serde_json::from_slice(&body).map_err(SuggestError::from)?;
    let response = state.service.handle(request).await?;
    Ok(Json(response))
}

/// Turn a panic anywhere in a handler into the generic 500
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);

    let body = Json(ErrorResponse {
        error: INTERNAL_ERROR_MESSAGE.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// GET /health - Liveness and collaborator configuration
async fn health_check<P, S>(State(state): State<AppState<P, S>>) -> Json<HealthCheckResponse>
where
    P: CompletionProvider + 'static,
    S: FeedbackStore + Send + 'static,
{
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        ai_configured: state.service.ai_configured(),
        feedback_store_configured: state.service.feedback_store_configured(),
    })
}

/// Create the axum router with all routes
pub fn create_router<P, S>(state: AppState<P, S>) -> Router
where
    P: CompletionProvider + 'static,
    S: FeedbackStore + Send + 'static,
{
    Router::new()
        .route(SUGGEST_PATH, post(suggest_mappings::<P, S>).fallback(method_not_allowed))
        .route("/", post(suggest_mappings::<P, S>).fallback(method_not_allowed))
        .route("/health", get(health_check::<P, S>))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
}
