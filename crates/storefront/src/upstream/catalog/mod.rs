//! Typed catalog client for the upstream mesh API.
//!
//! Uses `graphql_client` for type-safe queries with `reqwest` for HTTP.
//! Products and product listings are cached with `moka` (5-minute TTL) so
//! repeated page renders are served without refetching - the server-side
//! equivalent of the pre-fetched query cache the storefront used to ship to
//! browsers.

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::UpstreamConfig;
use crate::upstream::UpstreamError;
use crate::upstream::types::{
    NewsletterSignupResult, Product, ProductConnection, ProductListItem, ProductRef,
};

use cache::CacheValue;
use conversions::{
    convert_product, convert_product_connection, convert_product_refs, convert_signup_result,
};
use queries::{
    GetProduct, GetProductIds, GetProducts, NewsletterSignup, get_product, get_product_ids,
    get_products, newsletter_signup,
};

/// Default page size for product listings.
const DEFAULT_PAGE_SIZE: i64 = 24;

/// Image and variant fan-out for the product detail query.
const DETAIL_IMAGE_COUNT: i64 = 10;
const DETAIL_VARIANT_COUNT: i64 = 50;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the anonymous (API-key) half of the upstream mesh API.
///
/// Provides type-safe access to the product catalog and the newsletter
/// signup mutation. Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &UpstreamConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.api_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation against the mesh.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, UpstreamError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Api-Key", &self.inner.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(UpstreamError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Upstream API returned non-success status"
            );
            return Err(UpstreamError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse upstream GraphQL response"
                );
                return Err(UpstreamError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(UpstreamError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| super::GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Upstream GraphQL response has no data and no errors"
            );
            UpstreamError::GraphQL(vec![super::GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a paginated list of products.
    ///
    /// Search-free pages are cached; pages with a `query` filter always go
    /// to the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: Option<i64>,
        after: Option<String>,
        query: Option<String>,
    ) -> Result<ProductConnection, UpstreamError> {
        let cache_key = format!("products:{}:{:?}", after.as_deref().unwrap_or(""), query);

        if query.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let variables = get_products::Variables {
            first: first.or(Some(DEFAULT_PAGE_SIZE)),
            after: after.clone(),
            query: query.clone(),
        };

        let data = self.execute::<GetProducts>(variables).await?;

        let connection = convert_product_connection(data.products);

        if query.is_none() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(connection.clone()))
                .await;
        }

        Ok(connection)
    }

    /// Get a product by its global id.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::NotFound` if the product does not exist and
    /// other variants when the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &str) -> Result<Product, UpstreamError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = get_product::Variables {
            id: id.to_string(),
            image_count: Some(DETAIL_IMAGE_COUNT),
            variant_count: Some(DETAIL_VARIANT_COUNT),
        };

        let data = self.execute::<GetProduct>(variables).await?;

        let product_data = data
            .product
            .ok_or_else(|| UpstreamError::NotFound(format!("Product not found: {id}")))?;

        let product = convert_product(product_data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the id/slug pairs of every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_product_refs(&self) -> Result<Vec<ProductRef>, UpstreamError> {
        const CACHE_KEY: &str = "product_refs";

        if let Some(CacheValue::ProductRefs(refs)) =
            self.inner.cache.get(&CACHE_KEY.to_string()).await
        {
            debug!("Cache hit for product refs");
            return Ok(refs);
        }

        let data = self
            .execute::<GetProductIds>(get_product_ids::Variables {})
            .await?;

        let refs = convert_product_refs(data.products);

        self.inner
            .cache
            .insert(CACHE_KEY.to_string(), CacheValue::ProductRefs(refs.clone()))
            .await;

        Ok(refs)
    }

    /// Products related to `product_id`: the first page of the catalog with
    /// the product itself filtered out.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_related_products(
        &self,
        product_id: &str,
        limit: usize,
    ) -> Result<Vec<ProductListItem>, UpstreamError> {
        let connection = self.get_products(None, None, None).await?;

        Ok(connection
            .products
            .into_iter()
            .filter(|p| p.id != product_id)
            .take(limit)
            .collect())
    }

    // =========================================================================
    // Newsletter (not cached - mutation)
    // =========================================================================

    /// Subscribe an email address to a marketing list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self, email), fields(list_id = %list_id))]
    pub async fn newsletter_signup(
        &self,
        list_id: &str,
        email: &str,
    ) -> Result<NewsletterSignupResult, UpstreamError> {
        let variables = newsletter_signup::Variables {
            list_id: list_id.to_string(),
            email: email.to_string(),
        };

        let data = self.execute::<NewsletterSignup>(variables).await?;

        Ok(convert_signup_result(data.newsletter_signup))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: &str) {
        let cache_key = format!("product:{id}");
        self.inner.cache.invalidate(&cache_key).await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
