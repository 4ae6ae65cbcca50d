//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storyteller_core::generation::{ImageGenerator, TextGenerator};
use tower::ServiceExt;

use storyteller_api::state::AppState;

/// A model reply with four well-formed scenes wrapped in a `json` fence.
pub const FOUR_SCENE_REPLY: &str = r#"Here is your story:

```json
{
  "title": "The Clockwork Garden",
  "scenes": [
    {"scene_number": 1, "scene_title": "Introduction", "content": "A gardener winds the roses.", "image_prompt": "brass roses at dawn"},
    {"scene_number": 2, "scene_title": "Rising Action", "content": "The springs begin to slip.", "image_prompt": "a broken spring in the grass"},
    {"scene_number": 3, "scene_title": "Climax", "content": "The garden stops.", "image_prompt": "a frozen clockwork garden"},
    {"scene_number": 4, "scene_title": "Resolution", "content": "The roses tick again.", "image_prompt": "roses blooming in sunlight"}
  ]
}
```
"#;

/// Build the full app router around the given model doubles. Uses the same
/// route structure and middleware as `main.rs`.
pub fn build_test_app(
    text_generator: Arc<dyn TextGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
) -> Router {
    storyteller_api::app(AppState::new(text_generator, image_generator))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a raw body and optional content type, and return
/// the response.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_owned())).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
