//! HTTP request handlers

use super::state::AppState;
use crate::search::{SearchError, SearchRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Failure body: `{ error, detail?, query_used? }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_used: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            query_used: None,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            SearchError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Missing 'query' in request body"),
            ),
            SearchError::Upstream { detail } => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    detail: Some(detail),
                    ..ErrorBody::new("Google Places API error")
                },
            ),
            SearchError::NoResults { query_used } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    query_used: Some(query_used),
                    ..ErrorBody::new("No places found")
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Decode a search body the way the relay always has: leniently.
///
/// Anything that is not a JSON object with a string `query` counts as a missing
/// query. `use_llm` follows JSON truthiness and defaults to true.
pub fn parse_search_body(body: &[u8]) -> SearchRequest {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let query = value
        .get("query")
        .and_then(|q| q.as_str())
        .unwrap_or_default();

    let use_rewriter = match value.get("use_llm") {
        None => true,
        Some(flag) => is_truthy(flag),
    };

    SearchRequest::new(query).with_rewriter(use_rewriter)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Search handler
pub async fn search(State(state): State<AppState>, body: Bytes) -> Response {
    let request = parse_search_body(&body);

    match state.search.handle(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "version": crate::VERSION
    }))
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    Json(serde_json::json!({
        "counters": snapshot,
        "rewrite_fallback_rate": snapshot.rewrite_fallback_rate(),
        "rewriter_model": state.settings.rewriter.model,
    }))
}
