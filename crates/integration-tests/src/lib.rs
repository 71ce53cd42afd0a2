//! Integration test support for Driftwear.
//!
//! Tests drive the storefront router in-process with `tower::ServiceExt`
//! instead of binding a port. The database pool is created lazily, so
//! routes that never touch `PostgreSQL` run without one; routes that do
//! need the database are exercised in environments with `DATABASE_URL`
//! pointing at a migrated test database.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use axum::{Router, routing::get};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

use driftwear_storefront::config::{ShopifyOAuthConfig, StorefrontConfig, UpstreamConfig};
use driftwear_storefront::routes;
use driftwear_storefront::state::AppState;

/// A configuration pointing at addresses nothing listens on.
///
/// Handlers that talk to the upstream mesh will hit their error paths,
/// which is exactly what offline tests want to observe.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://postgres@127.0.0.1:5433/driftwear_test"),
        host: "127.0.0.1".parse().expect("valid test host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("integration-session-0123456789abcdef"),
        upstream: UpstreamConfig {
            api_url: "http://127.0.0.1:9/graphql".to_string(),
            api_key: SecretString::from("tK4v8Qw2xLp9mR3z"),
        },
        shopify: ShopifyOAuthConfig {
            shop: "driftwear-test".to_string(),
            api_version: "2024-01".to_string(),
            client_id: "test-client".to_string(),
            client_secret: SecretString::from("bN7c2Yw6Qz1vD4gX"),
        },
        newsletter_list_id: "TestL1".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build an [`AppState`] with a lazy pool and the real content directory.
///
/// # Panics
///
/// Panics if the database URL fails to parse or the content directory
/// fails to load; both indicate a broken test setup.
#[must_use]
pub fn test_state() -> AppState {
    let config = test_config();

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1:5433/driftwear_test")
        .expect("lazy pool from a valid URL");

    // Relative to this crate's directory at test runtime
    let content_dir = Path::new("../storefront/content");

    AppState::new(config, pool, content_dir).expect("test state")
}

/// Build the storefront router (health endpoints + page routes) without the
/// session layer, backed by [`test_state`].
#[must_use]
pub fn test_router() -> Router {
    let state = test_state();

    Router::new()
        .route("/health", get(routes::health))
        .route("/health/ready", get(routes::readiness))
        .merge(routes::routes())
        .with_state(state)
}
