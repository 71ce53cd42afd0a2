//! Domain types for the upstream commerce mesh API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! `graphql_client` generated types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Mesh image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Review Types
// =============================================================================

/// Aggregate review statistics for a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Average rating (1.0 - 5.0).
    pub average: f64,
    /// Total number of reviews.
    pub count: i64,
}

/// A single customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review ID.
    pub id: String,
    /// Display name of the reviewer.
    pub reviewer: String,
    /// Star rating (1-5).
    pub rating: i64,
    /// Optional review title.
    pub title: Option<String>,
    /// Review body text.
    pub body: String,
    /// Submission timestamp (RFC 3339).
    pub created_at: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant display name.
    pub name: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Current price.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
}

/// A catalog listing entry (the projection the listing grid renders).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListItem {
    /// Product ID (global id form).
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Plain text description.
    pub description: String,
    /// Product type/category.
    pub product_type: Option<String>,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Compare-at price range.
    pub compare_at_price_range: Option<PriceRange>,
    /// Aggregate review stats, when the product has reviews.
    pub rating: Option<ReviewStats>,
}

/// A fully-loaded product (the projection the detail page renders).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (global id form).
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product type/category.
    pub product_type: Option<String>,
    /// Product tags.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images.
    pub images: Vec<Image>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Compare-at price range.
    pub compare_at_price_range: Option<PriceRange>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// Aggregate review stats.
    pub rating: Option<ReviewStats>,
    /// Individual reviews.
    pub reviews: Vec<Review>,
}

/// Minimal product reference (id + slug), used for related-product
/// selection and path enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product ID (global id form).
    pub id: String,
    /// URL slug.
    pub slug: String,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Paginated list of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<ProductListItem>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Newsletter Types
// =============================================================================

/// Result of the anonymous newsletter signup mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterSignupResult {
    /// The list the email was added to.
    pub list_id: String,
    /// Whether the address is now subscribed.
    pub subscribed: bool,
    /// Optional human-readable status from the mesh.
    pub message: Option<String>,
}

/// A marketing list together with the signed-in customer's membership.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsletterSubscription {
    /// The marketing list ID.
    #[serde(rename = "listId")]
    pub list_id: String,
    /// Human-readable list name.
    pub name: String,
    /// Whether the customer is currently subscribed.
    pub subscribed: bool,
}

// =============================================================================
// Profile Types
// =============================================================================

/// The signed-in customer's profile, as projected by the mesh.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Profile ID.
    pub id: String,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    /// Phone number (E.164).
    pub phone: Option<String>,
}

impl Profile {
    /// The customer's full name, best-effort.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Input for updating the customer profile.
#[derive(Debug, Default, Serialize)]
pub struct ProfileUpdateInput {
    /// First name.
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_combinations() {
        let mut profile = Profile {
            id: "p1".to_string(),
            email: None,
            first_name: Some("Jordan".to_string()),
            last_name: Some("Lee".to_string()),
            phone: None,
        };
        assert_eq!(profile.full_name(), "Jordan Lee");

        profile.last_name = None;
        assert_eq!(profile.full_name(), "Jordan");

        profile.first_name = None;
        assert_eq!(profile.full_name(), "");
    }

    #[test]
    fn profile_deserializes_camel_case() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":"p1","email":"a@b.com","firstName":"A","lastName":"B","phone":null}"#,
        )
        .expect("valid profile json");
        assert_eq!(profile.first_name.as_deref(), Some("A"));
        assert_eq!(profile.last_name.as_deref(), Some("B"));
    }
}
