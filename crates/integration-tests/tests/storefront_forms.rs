//! Form-handling tests for the storefront router.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use driftwear_integration_tests::test_router;

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-forwarded-for", "203.0.113.7")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn newsletter_rejects_invalid_email_before_upstream() {
    let response = test_router()
        .oneshot(post_form("/newsletter/subscribe", "email=not-an-email"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Please enter a valid email address."));
    assert!(body.contains("not-an-email"));
}

#[tokio::test]
async fn newsletter_failure_renders_retry_fragment() {
    // Valid email, but the mesh endpoint is a closed port
    let response = test_router()
        .oneshot(post_form(
            "/newsletter/subscribe",
            "email=shopper%40example.com",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Something went wrong. Please try again."));
    assert!(body.contains("shopper@example.com"));
}

#[tokio::test]
async fn account_forms_require_identity() {
    let response = test_router()
        .oneshot(post_form("/account/referrals", "email=friend%40example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
