//! Answer query endpoints.
//!
//! Both handlers swallow store errors into client-visible absence: the
//! list degrades to an empty array and the lookup to a 404, never a 5xx.
//! Callers cannot distinguish backend failure from missing data.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use read_store::AnswerStore;
use serde::Serialize;

/// Hard cap on the number of records the list endpoint returns.
pub const LIST_LIMIT: usize = 100;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: Arc<dyn AnswerStore>,
}

/// GET /api/v1/answers — up to [`LIST_LIMIT`] records, pretty-printed.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let answers = match state.store.list(LIST_LIMIT).await {
        Ok(answers) => answers,
        Err(error) => {
            tracing::error!(%error, "cannot list answers");
            Vec::new()
        }
    };

    pretty_json(StatusCode::OK, &answers)
}

/// GET /api/v1/answers/{id} — one record, or 404 when absent.
#[tracing::instrument(skip(state))]
pub async fn get(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Ok(Some(answer)) => pretty_json(StatusCode::OK, &answer),
        Ok(None) => pretty_json(StatusCode::NOT_FOUND, &"Answer not found"),
        Err(error) => {
            tracing::error!(%error, id, "cannot load answer");
            pretty_json(StatusCode::NOT_FOUND, &"Answer not found")
        }
    }
}

/// Renders a value as indented JSON with the given status.
fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    // Serialization of these record types cannot fail; degrade to null
    // rather than surface a 5xx if it ever does.
    let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}
