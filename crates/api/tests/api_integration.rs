//! Integration tests for the query API.

use std::sync::Arc;
use std::sync::OnceLock;

use api::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use read_store::{AnswerStore, DenormalizedAnswer, InMemoryAnswerStore, StoreError};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, InMemoryAnswerStore) {
    let store = InMemoryAnswerStore::new();
    let state = Arc::new(AppState {
        store: Arc::new(store.clone()),
    });
    (api::create_app(state, get_metrics_handle()), store)
}

/// A store whose every operation fails, for error-swallowing tests.
struct BrokenStore;

#[async_trait]
impl AnswerStore for BrokenStore {
    async fn insert(&self, _answer: DenormalizedAnswer) -> read_store::Result<()> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: &str) -> read_store::Result<Option<DenormalizedAnswer>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self, _limit: usize) -> read_store::Result<Vec<DenormalizedAnswer>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

fn setup_broken() -> axum::Router {
    let state = Arc::new(AppState {
        store: Arc::new(BrokenStore),
    });
    api::create_app(state, get_metrics_handle())
}

fn answer(id: &str) -> DenormalizedAnswer {
    DenormalizedAnswer {
        id: id.to_string(),
        content: "hi".to_string(),
        author: "Ada Lovelace".to_string(),
        created_at: Utc::now(),
        discussion: "d1".to_string(),
    }
}

async fn get_body(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&get_body(response).await).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_answers_empty_store() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&get_body(response).await).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn list_answers_returns_records_pretty_printed() {
    let (app, store) = setup();
    store.insert(answer("a1")).await.unwrap();
    store.insert(answer("a2")).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = get_body(response).await;
    // Indented rendering, not compact
    assert!(body.contains("\n  "));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "a1");
    assert_eq!(records[0]["author"], "Ada Lovelace");
    assert_eq!(records[1]["id"], "a2");
}

#[tokio::test]
async fn list_answers_caps_at_one_hundred() {
    let (app, store) = setup();
    for i in 0..120 {
        store.insert(answer(&format!("a{i}"))).await.unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&get_body(response).await).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn get_answer_by_id() {
    let (app, store) = setup();
    store.insert(answer("a1")).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers/a1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&get_body(response).await).unwrap();
    assert_eq!(json["id"], "a1");
    assert_eq!(json["discussion"], "d1");
}

#[tokio::test]
async fn get_missing_answer_is_not_found() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_body(response).await, "\"Answer not found\"");
}

#[tokio::test]
async fn list_swallows_store_errors_into_empty_array() {
    let app = setup_broken();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Never a 5xx: backend failure degrades to an empty result
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&get_body(response).await).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn get_swallows_store_errors_into_not_found() {
    let app = setup_broken();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/answers/a1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_body(response).await, "\"Answer not found\"");
}
