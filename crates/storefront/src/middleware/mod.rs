//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (add unique ID to each request)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Security headers (CSP, frame options, etc.)
//! 5. Rate limiting (governor, auth + newsletter endpoints only)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shop_identity;

pub use rate_limit::form_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use shop_identity::{
    OptionalShopIdentity, RequireShopIdentity, clear_shop_identity, set_shop_identity,
};
