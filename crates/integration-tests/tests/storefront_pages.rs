//! Page-level tests for the storefront router.
//!
//! These run fully offline: the upstream mesh config points at a closed
//! port, so catalog-backed pages exercise their error paths, and pages
//! that never leave the process render normally.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use driftwear_integration_tests::test_router;

/// Requests carry a forwarded-for header because the form rate limiter
/// keys on the proxy-provided client IP.
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", "203.0.113.7")
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_router().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn readiness_is_unavailable_without_database() {
    let response = test_router().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn login_page_renders_sign_in_button() {
    let response = test_router().oneshot(get("/auth/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Sign in to your account"));
    assert!(body.contains("Sign in with Shopify"));
}

#[tokio::test]
async fn login_page_maps_error_codes() {
    let response = test_router()
        .oneshot(get("/auth/login?error=SessionRequired"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Please sign in to access this page."));
}

#[tokio::test]
async fn login_page_unknown_error_falls_back() {
    let response = test_router()
        .oneshot(get("/auth/login?error=NoSuchCode"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Unable to sign in."));
}

#[tokio::test]
async fn content_page_renders_markdown() {
    let response = test_router().oneshot(get("/pages/terms")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Terms of Service"));
    assert!(body.contains("<h2>"));
}

#[tokio::test]
async fn unknown_content_page_is_404() {
    let response = test_router()
        .oneshot(get("/pages/no-such-page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_renders_error_alert_when_upstream_is_down() {
    let response = test_router().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Error loading products"));
}

#[tokio::test]
async fn product_detail_surfaces_upstream_failure() {
    let response = test_router()
        .oneshot(get("/products/6857243132004"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_string(response).await;
    assert!(body.contains("Something went wrong"));
}

#[tokio::test]
async fn account_without_session_is_unauthorized() {
    // No session layer is mounted, so the identity extractor rejects
    let response = test_router().oneshot(get("/account")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rendered_pages_are_html() {
    let response = test_router().oneshot(get("/auth/login")).await.unwrap();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}
