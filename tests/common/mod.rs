#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use places_relay::{
    network::HttpClient,
    web::{create_router, AppState},
    Settings,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const PLACES_PATH: &str = "/maps/api/place/textsearch/json";
pub const COMPLETIONS_PATH: &str = "/api/chat/completions";
pub const GOOGLE_KEY: &str = "test-key";

/// Settings pointing both remote services at `server`
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.rewriter.base_url = server.uri();
    settings.rewriter.timeout = 1.0;
    settings.google.api_key = GOOGLE_KEY.to_string();
    settings.google.places_endpoint = format!("{}{}", server.uri(), PLACES_PATH);
    settings.google.search_timeout = 1.0;
    settings.server.limiter = false;
    settings
}

pub fn router(settings: Settings) -> Router {
    let client = HttpClient::with_settings(&settings.outgoing).expect("client");
    let state = AppState::new(settings, client).expect("state");
    create_router(state)
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub fn places(results: Value) -> Value {
    let status = if results.as_array().map_or(true, |r| r.is_empty()) {
        "ZERO_RESULTS"
    } else {
        "OK"
    };
    json!({"html_attributions": [], "results": results, "status": status})
}

pub fn ramen_ichiban() -> Value {
    json!([{
        "name": "Ramen Ichiban",
        "formatted_address": "Jl. Sudirman No. 1, Jakarta",
        "place_id": "p1",
        "geometry": {"location": {"lat": -6.2088, "lng": 106.8456}}
    }])
}

pub async fn mount_completion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

pub async fn mount_places(server: &MockServer, query: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(PLACES_PATH))
        .and(query_param("query", query))
        .and(query_param("key", GOOGLE_KEY))
        .respond_with(template)
        .mount(server)
        .await;
}

/// POST a raw body to /search and decode the JSON answer
pub async fn post_search(app: &Router, body: &str) -> (StatusCode, Value) {
    let (status, bytes) = post_search_raw(app, body).await;
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

pub async fn post_search_raw(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, bytes.to_vec())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}
