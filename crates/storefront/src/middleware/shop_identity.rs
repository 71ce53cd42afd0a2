//! Shop identity extractors.
//!
//! Provides extractors for requiring (or optionally reading) the OAuth
//! session identity in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;
use crate::shopify::{ShopAccessToken, ShopIdentity};

/// Extractor that requires a signed-in shop identity.
///
/// HTML requests without one are redirected to the sign-in page with the
/// `SessionRequired` error code; API requests get a bare 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn account(
///     RequireShopIdentity(identity, token): RequireShopIdentity,
/// ) -> impl IntoResponse {
///     // identity.name, token.access_token ...
/// }
/// ```
pub struct RequireShopIdentity(pub ShopIdentity, pub ShopAccessToken);

/// Rejection returned when the identity is required but missing.
pub enum ShopIdentityRejection {
    /// Redirect to the sign-in page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for ShopIdentityRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => {
                Redirect::to("/auth/login?error=SessionRequired").into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireShopIdentity
where
    S: Send + Sync,
{
    type Rejection = ShopIdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(ShopIdentityRejection::Unauthorized)?;

        let is_api = parts.uri.path().starts_with("/api/");
        let missing = || {
            if is_api {
                ShopIdentityRejection::Unauthorized
            } else {
                ShopIdentityRejection::RedirectToLogin
            }
        };

        let identity: ShopIdentity = session
            .get(session_keys::SHOP_IDENTITY)
            .await
            .ok()
            .flatten()
            .ok_or_else(missing)?;

        let token: ShopAccessToken = session
            .get(session_keys::SHOP_ACCESS_TOKEN)
            .await
            .ok()
            .flatten()
            .ok_or_else(missing)?;

        Ok(Self(identity, token))
    }
}

/// Extractor that optionally reads the shop identity.
///
/// Unlike [`RequireShopIdentity`] this never rejects; handlers get `None`
/// for guests.
pub struct OptionalShopIdentity(pub Option<ShopIdentity>);

impl<S> FromRequestParts<S> for OptionalShopIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<ShopIdentity>(session_keys::SHOP_IDENTITY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(identity))
    }
}

/// Store the identity and its backing token in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_shop_identity(
    session: &Session,
    identity: &ShopIdentity,
    token: &ShopAccessToken,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::SHOP_IDENTITY, identity)
        .await?;
    session
        .insert(session_keys::SHOP_ACCESS_TOKEN, token)
        .await
}

/// Remove the identity and token from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_shop_identity(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<ShopIdentity>(session_keys::SHOP_IDENTITY)
        .await?;
    session
        .remove::<ShopAccessToken>(session_keys::SHOP_ACCESS_TOKEN)
        .await?;
    Ok(())
}
