//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentLibrary};
use crate::shopify::ShopOAuthClient;
use crate::upstream::{CatalogClient, ProfileClient};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; owns the API clients, database pool, and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: CatalogClient,
    profile: ProfileClient,
    oauth: ShopOAuthClient,
    content: ContentLibrary,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be loaded.
    pub fn new(
        config: StorefrontConfig,
        pool: PgPool,
        content_dir: &Path,
    ) -> Result<Self, ContentError> {
        let catalog = CatalogClient::new(&config.upstream);
        let profile = ProfileClient::new(&config.upstream);
        let oauth = ShopOAuthClient::new(&config.shopify);
        let content = ContentLibrary::load(content_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                profile,
                oauth,
                content,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the profile API client.
    #[must_use]
    pub fn profile(&self) -> &ProfileClient {
        &self.inner.profile
    }

    /// Get a reference to the OAuth client.
    #[must_use]
    pub fn oauth(&self) -> &ShopOAuthClient {
        &self.inner.oauth
    }

    /// Get a reference to the markdown content library.
    #[must_use]
    pub fn content(&self) -> &ContentLibrary {
        &self.inner.content
    }
}
