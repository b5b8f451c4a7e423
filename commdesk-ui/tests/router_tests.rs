//! Router-level tests
//!
//! Exercises the public surface and the session gate without a live
//! platform: health is public, everything under /api requires a bearer
//! token and is rejected before any handler work when it is absent.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use commdesk_common::config::PlatformConfig;
use commdesk_common::PlatformClient;
use commdesk_ui::{build_router, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    // Points at a placeholder platform; these tests never reach it
    let platform = PlatformClient::new(&PlatformConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        service_key: "test-key".to_string(),
    });
    build_router(AppState::new(platform))
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "commdesk-ui");
}

#[tokio::test]
async fn api_without_token_is_unauthorized() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/api/contacts").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Missing Authorization"));
}

#[tokio::test]
async fn dashboard_without_token_is_unauthorized() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/api/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
