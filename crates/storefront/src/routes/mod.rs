//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (product listing)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Products
//! GET  /products/{id}          - Product detail (numeric id)
//!
//! # Newsletter
//! POST /newsletter/subscribe   - Footer signup form (returns a fragment)
//!
//! # Auth
//! GET  /auth/login             - Sign-in page
//! POST /auth/logout            - Sign out
//! GET  /auth/shopify/login     - Redirect to the platform OAuth page
//! GET  /auth/shopify/callback  - Handle the OAuth callback
//!
//! # Account (requires a signed-in shop identity)
//! GET  /account                - Profile form, newsletter toggles, referrals
//! POST /account/profile        - Update profile
//! POST /account/newsletter     - Toggle a list subscription
//! POST /account/referrals      - Send a referral invitation
//!
//! # Content
//! GET  /pages/{slug}           - Markdown content pages (about, terms, ...)
//! ```

pub mod account;
pub mod auth;
pub mod home;
pub mod newsletter;
pub mod pages;
pub mod products;
pub mod shopify_auth;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::form_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/logout", post(auth::logout))
        // Platform OAuth
        .route("/shopify/login", get(shopify_auth::login))
        .route("/shopify/callback", get(shopify_auth::callback))
        .layer(form_rate_limiter())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/profile", post(account::update_profile))
        .route("/newsletter", post(account::toggle_newsletter))
        .route("/referrals", post(account::create_referral))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .layer(form_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Newsletter signup
        .nest("/newsletter", newsletter_routes())
        // Account routes
        .nest("/account", account_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        // Content pages
        .route("/pages/{slug}", get(pages::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
