//! Session key constants.
//!
//! Everything authentication-related that lives in the session is stored
//! under these keys. The values themselves are [`crate::shopify::ShopIdentity`]
//! and [`crate::shopify::ShopAccessToken`].

/// Session keys for authentication data.
pub mod keys {
    /// Key for the signed-in shop identity.
    pub const SHOP_IDENTITY: &str = "shop_identity";

    /// Key for the platform access token backing the identity.
    pub const SHOP_ACCESS_TOKEN: &str = "shop_access_token";

    /// Key for the OAuth state parameter (CSRF protection, one-time use).
    pub const OAUTH_STATE: &str = "oauth_state";
}
