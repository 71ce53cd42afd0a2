//! Home page route handler: the product listing grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use driftwear_core::Price;

use crate::filters;
use crate::middleware::OptionalShopIdentity;
use crate::state::AppState;
use crate::upstream::gid::parse_product_gid;
use crate::upstream::types::{Money, ProductListItem, ReviewStats};

// =============================================================================
// View Models
// =============================================================================

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Review stats display data for templates.
#[derive(Clone)]
pub struct RatingView {
    pub average: String,
    pub count: i64,
}

impl From<&ReviewStats> for RatingView {
    fn from(stats: &ReviewStats) -> Self {
        Self {
            average: format!("{:.1}", stats.average),
            count: stats.count,
        }
    }
}

/// Product card data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    /// Storefront path to the detail page.
    pub path: String,
    pub name: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image: Option<ImageView>,
    pub product_type: Option<String>,
    pub rating: Option<RatingView>,
}

/// Format an upstream money value as a price string.
///
/// Falls back to the raw amount when it is not parseable as a decimal in a
/// supported currency.
pub fn format_price(money: &Money) -> String {
    Price::parse(&money.amount, &money.currency_code)
        .map_or_else(|_| format!("${}", money.amount), |price| price.display())
}

impl From<&ProductListItem> for ProductCardView {
    fn from(product: &ProductListItem) -> Self {
        // Detail routes use the bare numeric id; fall back to the slug for
        // products with non-numeric ids
        let path = parse_product_gid(&product.id).map_or_else(
            || format!("/products/{}", product.slug),
            |id| format!("/products/{id}"),
        );

        let image = product.featured_image.as_ref().map(|img| ImageView {
            url: img.url.clone(),
            alt: img.alt_text.clone().unwrap_or_default(),
        });

        Self {
            path,
            name: product.name.clone(),
            price: format_price(&product.price_range.min_variant_price),
            compare_at_price: product
                .compare_at_price_range
                .as_ref()
                .filter(|r| r.min_variant_price.amount != "0.0")
                .map(|r| format_price(&r.min_variant_price)),
            image,
            product_type: product.product_type.clone(),
            rating: product.rating.as_ref().map(RatingView::from),
        }
    }
}

// =============================================================================
// Template & Handler
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Listing header text.
    pub heading: &'static str,
    pub subheading: &'static str,
    /// Name of the signed-in shop, for the greeting.
    pub shop_name: Option<String>,
    /// Product cards, empty when the catalog call failed.
    pub products: Vec<ProductCardView>,
    /// Formatted upstream error, when the catalog call failed.
    pub error: Option<String>,
}

/// Display the home page.
#[instrument(skip(state, identity))]
pub async fn home(
    State(state): State<AppState>,
    OptionalShopIdentity(identity): OptionalShopIdentity,
) -> impl IntoResponse {
    let (products, error) = match state.catalog().get_products(None, None, None).await {
        Ok(connection) => (
            connection.products.iter().map(ProductCardView::from).collect(),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (Vec::new(), Some(e.to_string()))
        }
    };

    HomeTemplate {
        heading: "Clothes!",
        subheading: "Fun for everyone.",
        shop_name: identity.map(|i| i.name),
        products,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::types::PriceRange;

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn list_item() -> ProductListItem {
        ProductListItem {
            id: "gid://shopify/Product/6857243132004".to_string(),
            name: "Mesh Gym Shorts".to_string(),
            slug: "mesh-gym-shorts".to_string(),
            description: "Lightweight shorts.".to_string(),
            product_type: Some("Shorts".to_string()),
            available_for_sale: true,
            featured_image: None,
            price_range: PriceRange {
                min_variant_price: money("29.00"),
                max_variant_price: money("29.00"),
            },
            compare_at_price_range: None,
            rating: Some(ReviewStats {
                average: 4.333,
                count: 12,
            }),
        }
    }

    #[test]
    fn format_price_renders_symbol_and_cents() {
        assert_eq!(format_price(&money("29")), "$29.00");
        assert_eq!(format_price(&money("7.5")), "$7.50");
    }

    #[test]
    fn format_price_falls_back_on_garbage() {
        let m = Money {
            amount: "free".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(format_price(&m), "$free");
    }

    #[test]
    fn card_path_uses_numeric_id() {
        let card = ProductCardView::from(&list_item());
        assert_eq!(card.path, "/products/6857243132004");
    }

    #[test]
    fn card_path_falls_back_to_slug() {
        let mut item = list_item();
        item.id = "some-opaque-id".to_string();
        let card = ProductCardView::from(&item);
        assert_eq!(card.path, "/products/mesh-gym-shorts");
    }

    #[test]
    fn card_rating_is_rounded_for_display() {
        let card = ProductCardView::from(&list_item());
        let rating = card.rating.expect("has rating");
        assert_eq!(rating.average, "4.3");
        assert_eq!(rating.count, 12);
    }
}
