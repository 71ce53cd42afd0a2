//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::upstream::UpstreamError;
use crate::upstream::gid::product_gid;
use crate::upstream::types::{Product, Review};

pub use super::home::{ImageView, ProductCardView, RatingView, format_price};

/// Number of related products shown under the detail page.
const RELATED_PRODUCT_COUNT: usize = 4;

// =============================================================================
// View Models
// =============================================================================

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub available: bool,
}

/// Review display data for templates.
#[derive(Clone)]
pub struct ReviewView {
    pub reviewer: String,
    pub rating: i64,
    pub title: Option<String>,
    pub body: String,
    /// Date portion of the RFC 3339 timestamp.
    pub date: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            reviewer: review.reviewer.clone(),
            rating: review.rating,
            title: review.title.clone(),
            body: review.body.clone(),
            date: review.created_at.chars().take(10).collect(),
        }
    }
}

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub name: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub description_html: String,
    pub available_for_sale: bool,
    pub featured_image: Option<ImageView>,
    pub images: Vec<ImageView>,
    pub variants: Vec<VariantView>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let to_image = |img: &crate::upstream::types::Image| ImageView {
            url: img.url.clone(),
            alt: img.alt_text.clone().unwrap_or_default(),
        };

        Self {
            name: product.name.clone(),
            price: format_price(&product.price_range.min_variant_price),
            compare_at_price: product
                .compare_at_price_range
                .as_ref()
                .filter(|r| r.min_variant_price.amount != "0.0")
                .map(|r| format_price(&r.min_variant_price)),
            description_html: product.description_html.clone(),
            available_for_sale: product.available_for_sale,
            featured_image: product.featured_image.as_ref().map(to_image),
            images: product.images.iter().map(to_image).collect(),
            variants: product
                .variants
                .iter()
                .map(|v| VariantView {
                    id: v.id.clone(),
                    name: v.name.clone(),
                    price: format_price(&v.price),
                    available: v.available_for_sale,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub rating: Option<RatingView>,
    pub reviews: Vec<ReviewView>,
    pub related_products: Vec<ProductCardView>,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

/// Upstream-error page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/error.html")]
pub struct ErrorPageTemplate {
    pub message: String,
}

// =============================================================================
// Handler
// =============================================================================

/// Resolve a route id (numeric, or a slug as fallback) to a global id.
async fn resolve_gid(state: &AppState, route_id: &str) -> Result<String, UpstreamError> {
    if let Ok(numeric) = route_id.parse::<u64>() {
        return Ok(product_gid(numeric));
    }

    // Slug fallback: scan the catalog's id/slug listing
    let refs = state.catalog().get_product_refs().await?;
    refs.into_iter()
        .find(|r| r.slug == route_id)
        .map(|r| r.id)
        .ok_or_else(|| UpstreamError::NotFound(format!("Product not found: {route_id}")))
}

/// Display the product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let gid = match resolve_gid(&state, &id).await {
        Ok(gid) => gid,
        Err(UpstreamError::NotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                NotFoundTemplate {
                    message: "This product could not be found.".to_string(),
                },
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to resolve product {id}: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                ErrorPageTemplate {
                    message: e.to_string(),
                },
            )
                .into_response();
        }
    };

    let product = match state.catalog().get_product(&gid).await {
        Ok(product) => product,
        Err(UpstreamError::NotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                NotFoundTemplate {
                    message: "This product could not be found.".to_string(),
                },
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch product {gid}: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                ErrorPageTemplate {
                    message: e.to_string(),
                },
            )
                .into_response();
        }
    };

    // Related products are decorative: failures log and render nothing
    let related_products = state
        .catalog()
        .get_related_products(&product.id, RELATED_PRODUCT_COUNT)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch related products: {e}");
                Vec::new()
            },
            |items| items.iter().map(ProductCardView::from).collect(),
        );

    ProductShowTemplate {
        rating: product.rating.as_ref().map(RatingView::from),
        reviews: product.reviews.iter().map(ReviewView::from).collect(),
        product: ProductDetailView::from(&product),
        related_products,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::types::{Money, PriceRange, ProductVariant};

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn sample_product() -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            name: "Sunfade Tee".to_string(),
            slug: "sunfade-tee".to_string(),
            description: "A tee.".to_string(),
            description_html: "<p>A tee.</p>".to_string(),
            available_for_sale: true,
            product_type: Some("Shirts".to_string()),
            tags: vec!["summer".to_string()],
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-02-01T00:00:00Z".to_string(),
            featured_image: None,
            images: Vec::new(),
            price_range: PriceRange {
                min_variant_price: money("24.00"),
                max_variant_price: money("28.00"),
            },
            compare_at_price_range: None,
            variants: vec![ProductVariant {
                id: "gid://shopify/ProductVariant/11".to_string(),
                name: "Small".to_string(),
                available_for_sale: true,
                price: money("24.00"),
                compare_at_price: None,
            }],
            rating: None,
            reviews: vec![Review {
                id: "r1".to_string(),
                reviewer: "Sam".to_string(),
                rating: 5,
                title: Some("Great".to_string()),
                body: "Fits well.".to_string(),
                created_at: "2025-03-04T12:30:00Z".to_string(),
            }],
        }
    }

    #[test]
    fn detail_view_formats_variant_prices() {
        let view = ProductDetailView::from(&sample_product());
        assert_eq!(view.price, "$24.00");
        assert_eq!(view.variants.len(), 1);
        assert_eq!(view.variants.first().map(|v| v.price.as_str()), Some("$24.00"));
    }

    #[test]
    fn review_view_truncates_timestamp_to_date() {
        let product = sample_product();
        let review = ReviewView::from(product.reviews.first().expect("has review"));
        assert_eq!(review.date, "2025-03-04");
    }
}
