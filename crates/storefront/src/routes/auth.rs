//! Sign-in page and logout handlers.
//!
//! There is no local credential store: the only way in is the platform
//! OAuth flow, so the sign-in page is a single button plus an error slot
//! fed by `?error=` codes from the callback handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::clear_sentry_user;
use crate::filters;
use crate::middleware::clear_shop_identity;

/// Query parameters for the sign-in page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Sign-in error codes the OAuth handlers redirect with.
///
/// Codes map to customer-facing copy; anything unrecognized falls back to
/// a generic message.
#[must_use]
pub fn error_message(code: &str) -> &'static str {
    match code {
        "Signin" | "OAuthSignin" | "OAuthCallback" | "OAuthCreateAccount" => {
            "Try signing in with a different account."
        }
        "Callback" => "Sign-in could not be completed. Please try again.",
        "SessionRequired" => "Please sign in to access this page.",
        _ => "Unable to sign in.",
    }
}

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Display the sign-in page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Sign out: clear the session identity and return home.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_shop_identity(&session).await {
        tracing::error!("Failed to clear session identity: {e}");
    }
    clear_sentry_user();

    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_codes_share_copy() {
        assert_eq!(
            error_message("OAuthSignin"),
            "Try signing in with a different account."
        );
        assert_eq!(error_message("OAuthSignin"), error_message("OAuthCallback"));
    }

    #[test]
    fn session_required_has_specific_copy() {
        assert_eq!(
            error_message("SessionRequired"),
            "Please sign in to access this page."
        );
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(error_message("Banana"), "Unable to sign in.");
        assert_eq!(error_message(""), "Unable to sign in.");
    }
}
