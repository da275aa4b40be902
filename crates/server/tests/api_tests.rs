//! Integration tests for HTTP API endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use shroud_core::{AppConfig, ServerConfig};
use shroud_server::{create_router, AppState};
use tower::ServiceExt;

fn test_router() -> Router {
    create_router(AppState::new(AppConfig::for_testing()))
}

/// Helper to make GET requests with an optional api key header.
async fn get(router: &Router, uri: &str, api_key: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_returns_fixed_informational_text() {
    let router = test_router();
    let (status, body) = get(&router, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/code"));
    assert!(body.contains("x-api-key"));
}

#[tokio::test]
async fn health_check_is_unauthenticated() {
    let router = test_router();
    let (status, body) = get(&router, "/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn code_without_key_is_bad_request() {
    let router = test_router();
    let (status, body) = get(&router, "/code", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json.get("code").and_then(|v| v.as_str()),
        Some("bad_request")
    );
}

#[tokio::test]
async fn code_with_wrong_key_is_forbidden() {
    let router = test_router();

    for wrong in ["", "nope", "test-api-key ", "TEST-API-KEY", "test-api-ke"] {
        let (status, _) = get(&router, "/code", Some(wrong)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "key {wrong:?} was accepted");
    }
}

#[tokio::test]
async fn code_with_correct_key_returns_the_handler_source() {
    let router = test_router();
    let (status, body) = get(&router, "/code", Some("test-api-key")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, shroud_bot::OBF_COMMAND_SOURCE);
    assert!(body.contains("obf"));
}

#[tokio::test]
async fn code_body_is_identical_across_requests() {
    let router = test_router();
    let (_, first) = get(&router, "/code", Some("test-api-key")).await;
    let (_, second) = get(&router, "/code?anything=else", Some("test-api-key")).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn code_content_type_is_plain_text() {
    let router = test_router();
    let request = Request::builder()
        .method("GET")
        .uri("/code")
        .header("x-api-key", "test-api-key")
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got: {content_type}");
}

#[tokio::test]
async fn unconfigured_key_rejects_every_credential() {
    let config = AppConfig {
        server: ServerConfig {
            bind: "127.0.0.1:0".to_string(),
            api_key: None,
        },
        ..AppConfig::for_testing()
    };
    let router = create_router(AppState::new(config));

    let (status, _) = get(&router, "/code", Some("test-api-key")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Missing credential is still a bad request, not forbidden.
    let (status, _) = get(&router, "/code", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
