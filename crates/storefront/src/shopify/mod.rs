//! OAuth adapter for the commerce platform (Shopify).
//!
//! Sign-in is delegated to the platform's merchant OAuth flow and the
//! resulting shop profile becomes the session identity. The flow:
//!
//! 1. Generate the authorization URL with `authorization_url()`
//! 2. Redirect the customer to the platform's consent page
//! 3. The platform redirects back with an authorization code
//! 4. Exchange the code for an access token with `exchange_code()`
//! 5. Fetch the shop profile with `fetch_shop()` and map it into a
//!    [`ShopIdentity`] for the session
//!
//! The token endpoint uses `client_secret_post` authentication: client id
//! and secret travel in the form body, not an Authorization header.

mod types;

pub use types::*;

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::ShopifyOAuthConfig;

/// Scopes requested during authorization.
const OAUTH_SCOPES: &str = "read_orders write_orders";

/// Errors that can occur during the OAuth flow.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth exchange or shop-info fetch was rejected.
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the platform's OAuth endpoints and shop-info API.
#[derive(Clone)]
pub struct ShopOAuthClient {
    inner: Arc<ShopOAuthClientInner>,
}

struct ShopOAuthClientInner {
    client: reqwest::Client,
    shop: String,
    api_version: String,
    client_id: String,
    client_secret: String,
}

impl ShopOAuthClient {
    /// Create a new OAuth client.
    #[must_use]
    pub fn new(config: &ShopifyOAuthConfig) -> Self {
        Self {
            inner: Arc::new(ShopOAuthClientInner {
                client: reqwest::Client::new(),
                shop: config.shop.clone(),
                api_version: config.api_version.clone(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
            }),
        }
    }

    /// The shop subdomain this client is bound to.
    #[must_use]
    pub fn shop(&self) -> &str {
        &self.inner.shop
    }

    fn shop_base(&self) -> String {
        format!("https://{}.myshopify.com", self.inner.shop)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OAuth Flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate the authorization URL for merchant sign-in.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The callback URL to return to after consent
    /// * `state` - A random string stored in the session to prevent CSRF
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/admin/oauth/authorize?\
            client_id={}&\
            scope={}&\
            redirect_uri={}&\
            state={}",
            self.shop_base(),
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(OAUTH_SCOPES),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state)
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::OAuth` with the upstream message when the
    /// platform rejects the exchange.
    pub async fn exchange_code(&self, code: &str) -> Result<ShopAccessToken, ShopifyError> {
        let url = format!("{}/admin/oauth/access_token", self.shop_base());

        let params = [
            ("client_id", self.inner.client_id.as_str()),
            ("client_secret", self.inner.client_secret.as_str()),
            ("code", code),
        ];

        let response = self.inner.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ShopifyError::OAuth(format!(
                "Token exchange failed: {text}"
            )));
        }

        let token_response: TokenResponse = response.json().await?;

        Ok(ShopAccessToken {
            access_token: token_response.access_token,
            scope: token_response.scope,
            obtained_at: chrono::Utc::now().timestamp(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shop Profile
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the shop profile that backs the session identity.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::OAuth` when the token is missing or the
    /// platform rejects the request.
    pub async fn fetch_shop(&self, access_token: &str) -> Result<Shop, ShopifyError> {
        if access_token.is_empty() {
            return Err(ShopifyError::OAuth("Access token is missing".to_string()));
        }

        let url = format!(
            "{}/admin/api/{}/shop.json",
            self.shop_base(),
            self.inner.api_version
        );

        let response = self
            .inner
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("X-Shopify-Access-Token", access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ShopifyError::OAuth(format!(
                "Shop info request failed ({status}): {text}"
            )));
        }

        let info: ShopInfoResponse = response.json().await?;
        Ok(info.shop)
    }

    /// Run the post-callback half of the flow: exchange the code, fetch the
    /// shop profile, and map it into a session identity.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::exchange_code`] and
    /// [`Self::fetch_shop`].
    pub async fn sign_in(
        &self,
        code: &str,
    ) -> Result<(ShopIdentity, ShopAccessToken), ShopifyError> {
        let token = self.exchange_code(code).await?;
        let shop = self.fetch_shop(&token.access_token).await?;
        Ok((ShopIdentity::from(shop), token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> ShopOAuthClient {
        ShopOAuthClient::new(&ShopifyOAuthConfig {
            shop: "driftwear".to_string(),
            api_version: "2024-01".to_string(),
            client_id: "abc123".to_string(),
            client_secret: SecretString::from("sh_t3stS3cr3tV4lu3"),
        })
    }

    #[test]
    fn authorization_url_includes_oauth_params() {
        let client = test_client();
        let url = client.authorization_url("https://driftwear.shop/auth/shopify/callback", "st4te");

        assert!(url.starts_with("https://driftwear.myshopify.com/admin/oauth/authorize?"));
        assert!(url.contains("client_id=abc123"));
        assert!(url.contains("scope=read_orders%20write_orders"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fdriftwear.shop%2Fauth%2Fshopify%2Fcallback"));
        assert!(url.contains("state=st4te"));
    }

    #[test]
    fn authorization_url_encodes_state() {
        let client = test_client();
        let url = client.authorization_url("https://driftwear.shop/cb", "a b&c");
        assert!(url.contains("state=a%20b%26c"));
    }

    #[tokio::test]
    async fn fetch_shop_rejects_empty_token() {
        let client = test_client();
        let err = client.fetch_shop("").await.expect_err("must reject");
        assert!(matches!(err, ShopifyError::OAuth(_)));
        assert_eq!(err.to_string(), "OAuth error: Access token is missing");
    }
}
