//! Integration tests for the HTTP surface

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fieldmap_domain::traits::FeedbackStore;
use fieldmap_domain::FeedbackRecord;
use fieldmap_llm::MockProvider;
use fieldmap_scoring::CandidateRanker;
use fieldmap_server::handlers::{
    create_router, AppState, ErrorResponse, HealthCheckResponse, INTERNAL_ERROR_MESSAGE, SUGGEST_PATH,
};
use fieldmap_store::SqliteStore;
use fieldmap_suggester::MappingService;
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

/// Store that rejects every write
struct FailingStore;

impl FeedbackStore for FailingStore {
    type Error = String;

    fn append_feedback(&mut self, _records: &[FeedbackRecord]) -> Result<usize, Self::Error> {
        Err("database is locked".to_string())
    }
}

/// Store that blows up instead of returning an error
struct PanickingStore;

impl FeedbackStore for PanickingStore {
    type Error = String;

    fn append_feedback(&mut self, _records: &[FeedbackRecord]) -> Result<usize, Self::Error> {
        panic!("sqlite connection vanished mid-write");
    }
}

fn rule_based_app() -> Router {
    create_router(AppState::<MockProvider, SqliteStore>::new(MappingService::new(
        CandidateRanker::default(),
    )))
}

fn two_by_two() -> Value {
    json!({
        "sourceFields": [
            {"name": "customer_email", "type": "string"},
            {"name": "order_total", "type": "number"}
        ],
        "targetFields": [
            {"name": "email", "path": "billTo.email", "type": "string", "documentType": "order"},
            {"name": "total", "path": "summary.total", "type": "number", "documentType": "order"}
        ]
    })
}

fn feedback_body() -> Value {
    json!({
        "feedback": [{
            "source": "customer_email",
            "target": "billTo.email",
            "accepted": true,
            "confidence": 0.61
        }],
        "requestId": "req-feedback",
        "strategy": "rule-based"
    })
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(rule_based_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthCheckResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.ai_configured);
    assert!(!health.feedback_store_configured);
}

#[tokio::test]
async fn test_unreachable_provider_falls_back_to_rules() {
    let service: MappingService<MockProvider, SqliteStore> = MappingService::new(CandidateRanker::default())
        .with_provider(MockProvider::unreachable("connection refused"));
    let app = create_router(AppState::new(service));

    let (status, body) = send(app, post_json(SUGGEST_PATH, two_by_two().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["strategy"], "rule-based");
    assert_eq!(body["meta"]["sourceCount"], 2);
    assert_eq!(body["meta"]["targetCount"], 2);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    for suggestion in suggestions {
        assert_eq!(suggestion["suggestions"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_ai_suggestions_over_http() {
    let provider = MockProvider::new(
        r#"```json
{"mappings": [{"source": "order_total", "target": "summary.total", "confidence": 95, "rationale": ["both totals"]}]}
```"#,
    );
    let service: MappingService<MockProvider, SqliteStore> =
        MappingService::new(CandidateRanker::default()).with_provider(provider);
    let app = create_router(AppState::new(service));

    let (status, body) = send(app, post_json(SUGGEST_PATH, two_by_two().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["strategy"], "ai");
    assert_eq!(body["meta"]["model"], "mock");

    let total = &body["suggestions"][1]["suggestions"][0];
    assert_eq!(total["target"]["path"], "summary.total");
    assert_eq!(total["status"], "high");
    assert_eq!(total["breakdown"]["total"], 0.95);
    assert_eq!(total["breakdown"]["type"], 0.5);
    assert_eq!(total["rationale"], json!(["both totals"]));
}

#[tokio::test]
async fn test_candidate_wire_shape() {
    let body = json!({
        "sourceFields": [{"name": "customer_email", "type": "string"}],
        "targetFields": [{"name": "email", "path": "billTo.email", "type": "string", "documentType": "order"}],
        "requestId": "req-shape"
    });

    let (status, body) = send(rule_based_app(), post_json("/", body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["requestId"], "req-shape");
    assert_eq!(body["meta"]["model"], "rule-based");
    assert!(body["meta"]["prompt"].as_str().unwrap().contains("billTo.email"));

    let candidate = &body["suggestions"][0]["suggestions"][0];
    assert_eq!(candidate["status"], "medium");
    assert_eq!(candidate["breakdown"]["type"], 1.0);
    assert_eq!(candidate["breakdown"]["structural"], 0.85);
    assert_eq!(candidate["rationale"], json!(["type compatible", "similar depth"]));
}

#[tokio::test]
async fn test_missing_fields_is_bad_request() {
    let (status, body) = send(rule_based_app(), post_json(SUGGEST_PATH, r#"{"sourceFields": []}"#.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.error.contains("sourceFields"));
    assert!(error.error.contains("targetFields"));
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (status, body) = send(rule_based_app(), post_json(SUGGEST_PATH, "{not json".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri(SUGGEST_PATH)
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(rule_based_app(), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_feedback_without_store_is_ok() {
    let (status, body) = send(rule_based_app(), post_json(SUGGEST_PATH, feedback_body().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["feedbackStored"], false);
    assert_eq!(body["feedbackCount"], 1);
    assert_eq!(body["reason"], "feedback store not configured");
    assert_eq!(body["meta"]["requestId"], "req-feedback");
}

#[tokio::test]
async fn test_feedback_is_stored() {
    let service: MappingService<MockProvider, SqliteStore> = MappingService::new(CandidateRanker::default())
        .with_store(SqliteStore::new(":memory:").unwrap());
    let app = create_router(AppState::new(service));

    let (status, body) = send(app, post_json(SUGGEST_PATH, feedback_body().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedbackStored"], true);
    assert_eq!(body["feedbackCount"], 1);
    assert!(body.get("reason").is_none());
    assert_eq!(body["meta"]["strategy"], "rule-based");
}

#[tokio::test]
async fn test_feedback_store_failure_is_generic_500() {
    let service: MappingService<MockProvider, FailingStore> =
        MappingService::new(CandidateRanker::default()).with_store(FailingStore);
    let app = create_router(AppState::new(service));

    let (status, body) = send(app, post_json(SUGGEST_PATH, feedback_body().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.to_string().contains("database is locked"));
}

#[tokio::test]
async fn test_panic_in_pipeline_returns_generic_500() {
    let service: MappingService<MockProvider, PanickingStore> =
        MappingService::new(CandidateRanker::default()).with_store(PanickingStore);
    let app = create_router(AppState::new(service));

    let (status, body) = send(app, post_json(SUGGEST_PATH, feedback_body().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.to_string().contains("vanished"));
}

#[tokio::test]
async fn test_router_keeps_serving_after_panic() {
    let service: MappingService<MockProvider, PanickingStore> =
        MappingService::new(CandidateRanker::default()).with_store(PanickingStore);
    let app = create_router(AppState::new(service));

    let (status, _) = send(app.clone(), post_json(SUGGEST_PATH, feedback_body().to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(app, post_json(SUGGEST_PATH, two_by_two().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["strategy"], "rule-based");
}
