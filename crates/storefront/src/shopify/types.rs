//! Types for the commerce platform OAuth flow and shop-info endpoint.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// OAuth Types
// ─────────────────────────────────────────────────────────────────────────────

/// Access token obtained from the platform's OAuth token endpoint.
///
/// `Debug` is implemented manually so the token itself never reaches logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ShopAccessToken {
    /// The access token for API requests.
    pub access_token: String,
    /// Space-separated scopes the merchant granted.
    pub scope: String,
    /// Unix timestamp when the token was obtained.
    pub obtained_at: i64,
}

impl std::fmt::Debug for ShopAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopAccessToken")
            .field("access_token", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Raw token response from the platform OAuth endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub scope: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shop Info Types
// ─────────────────────────────────────────────────────────────────────────────

/// The shop resource returned by the platform's `shop.json` endpoint,
/// trimmed to the fields the storefront reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Shop {
    /// Numeric shop ID.
    pub id: i64,
    /// Shop display name.
    pub name: String,
    /// Shop contact email, when the platform exposes one.
    pub email: Option<String>,
    /// Primary shop domain.
    pub domain: Option<String>,
}

/// Envelope around [`Shop`] in the `shop.json` response.
#[derive(Debug, Deserialize)]
pub(super) struct ShopInfoResponse {
    pub shop: Shop,
}

/// The session identity a successful OAuth sign-in produces.
///
/// This is the storefront's projection of the third-party shop profile:
/// the platform's shop id and name become the signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopIdentity {
    /// Platform shop ID, stringified for session storage.
    pub id: String,
    /// Display name shown in the account header.
    pub name: String,
    /// Contact email, when known.
    pub email: Option<String>,
}

impl From<Shop> for ShopIdentity {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id.to_string(),
            name: shop.name,
            email: shop.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_maps_to_identity() {
        let shop = Shop {
            id: 4_810_553,
            name: "Driftwear Supply".to_string(),
            email: Some("owner@driftwear.shop".to_string()),
            domain: Some("driftwear.myshopify.com".to_string()),
        };

        let identity = ShopIdentity::from(shop);
        assert_eq!(identity.id, "4810553");
        assert_eq!(identity.name, "Driftwear Supply");
        assert_eq!(identity.email.as_deref(), Some("owner@driftwear.shop"));
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let token = ShopAccessToken {
            access_token: "shpat_abcdef0123456789".to_string(),
            scope: "read_orders write_orders".to_string(),
            obtained_at: 1_700_000_000,
        };

        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_abcdef0123456789"));
        assert!(debug_output.contains("read_orders write_orders"));
    }
}
