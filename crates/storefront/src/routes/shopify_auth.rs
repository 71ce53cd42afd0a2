//! Platform OAuth route handlers.
//!
//! - Login: generates a one-time `state`, stores it in the session, and
//!   redirects to the platform's authorization page
//! - Callback: validates `state`, exchanges the code, fetches the shop
//!   profile, and stores the resulting identity in the session
//!
//! Every failure branch lands back on `/auth/login?error=<code>`, where the
//! codes are the ones [`super::auth::error_message`] knows.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::middleware::set_shop_identity;
use crate::models::session_keys;
use crate::state::AppState;

/// Query parameters from the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a token.
    pub code: Option<String>,
    /// State parameter for CSRF protection.
    pub state: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

/// Generate a random alphanumeric string for the OAuth state parameter.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Initiate the platform OAuth sign-in.
///
/// # Route
///
/// `GET /auth/shopify/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    let oauth_state = generate_random_string(32);

    // Stored for validation on callback, removed after one use
    if let Err(e) = session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
    {
        tracing::error!("Failed to store OAuth state in session: {}", e);
        return Redirect::to("/auth/login?error=OAuthSignin").into_response();
    }

    let redirect_uri = format!("{}/auth/shopify/callback", state.config().base_url);
    let auth_url = state.oauth().authorization_url(&redirect_uri, &oauth_state);

    Redirect::to(&auth_url).into_response()
}

/// Handle the OAuth callback.
///
/// Validates the state parameter, exchanges the authorization code, maps
/// the shop profile into the session identity, and lands on the account
/// page.
///
/// # Route
///
/// `GET /auth/shopify/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // Check for OAuth errors from the platform
    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        tracing::warn!("OAuth error from platform: {} - {}", error, description);
        return Redirect::to("/auth/login?error=OAuthSignin").into_response();
    }

    let Some(code) = query.code else {
        tracing::warn!("OAuth callback missing code");
        return Redirect::to("/auth/login?error=OAuthCallback").into_response();
    };

    // Verify state parameter (CSRF protection)
    let Some(returned_state) = query.state else {
        tracing::warn!("OAuth callback missing state");
        return Redirect::to("/auth/login?error=OAuthCallback").into_response();
    };

    let stored_state: Option<String> = session
        .get(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();

    if stored_state.as_ref() != Some(&returned_state) {
        tracing::warn!("OAuth state mismatch");
        return Redirect::to("/auth/login?error=OAuthCallback").into_response();
    }

    // Clear the stored state (one-time use)
    let _ = session.remove::<String>(session_keys::OAUTH_STATE).await;

    // Exchange the code and map the shop profile into an identity
    let (identity, token) = match state.oauth().sign_in(&code).await {
        Ok(signed_in) => signed_in,
        Err(e) => {
            tracing::error!("OAuth code exchange failed: {}", e);
            return Redirect::to("/auth/login?error=Callback").into_response();
        }
    };

    if let Err(e) = set_shop_identity(&session, &identity, &token).await {
        tracing::error!("Failed to store identity in session: {}", e);
        return Redirect::to("/auth/login?error=Callback").into_response();
    }

    set_sentry_user(&identity.id, identity.email.as_deref());
    tracing::info!(shop = %identity.name, "Shop signed in");

    Redirect::to("/account").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_state_has_requested_length() {
        assert_eq!(generate_random_string(32).len(), 32);
        assert_eq!(generate_random_string(0).len(), 0);
    }

    #[test]
    fn random_state_is_alphanumeric() {
        let s = generate_random_string(64);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_states_differ() {
        assert_ne!(generate_random_string(32), generate_random_string(32));
    }
}
