#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use recipe_relay::{router, AppConfig, RelayBuilder};
use serde_json::Value;
use tower::ServiceExt;

/// Configuration pointing every upstream at a local mock server.
pub fn mock_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.timeout = 5;
    config.spoonacular.api_key = Some("test_key".to_string());
    config.spoonacular.base_url = base_url.to_string();
    config.groq.base_url = base_url.to_string();
    config.serpapi.base_url = base_url.to_string();
    config.news.feed_url = format!("{}/rss/DiningandWine.xml", base_url);
    config
}

pub fn app(config: AppConfig) -> Router {
    router(RelayBuilder::new().config(config).build().unwrap())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// A Groq chat completion whose message content is `content`.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}
