//! Conversion functions from `graphql_client` generated types to the
//! crate-owned domain types in [`crate::upstream::types`].
//!
//! Each generated module has its own copies of the shared fragments, so the
//! converters come in `_list` (`GetProducts`) and `_detail` (`GetProduct`)
//! flavors.

use crate::upstream::types::{
    Image, Money, NewsletterSignupResult, PageInfo, PriceRange, Product, ProductConnection,
    ProductListItem, ProductRef, ProductVariant, Review, ReviewStats,
};

use super::queries::{get_product, get_product_ids, get_products, newsletter_signup};

// =============================================================================
// GetProducts conversions
// =============================================================================

pub fn convert_product_connection(conn: get_products::GetProductsProducts) -> ProductConnection {
    ProductConnection {
        products: conn
            .edges
            .into_iter()
            .map(|e| convert_list_item(e.node))
            .collect(),
        page_info: PageInfo {
            has_next_page: conn.page_info.has_next_page,
            has_previous_page: conn.page_info.has_previous_page,
            start_cursor: conn.page_info.start_cursor,
            end_cursor: conn.page_info.end_cursor,
        },
    }
}

fn convert_list_item(node: get_products::GetProductsProductsEdgesNode) -> ProductListItem {
    let rating = node.reviews.map(|r| ReviewStats {
        average: r.stats.average,
        count: r.stats.count,
    });
    let fields = node.product_fields;

    ProductListItem {
        id: fields.id,
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        product_type: fields.product_type,
        available_for_sale: fields.available_for_sale,
        featured_image: fields.featured_image.map(convert_image_list),
        price_range: convert_price_range_list(fields.price_range),
        compare_at_price_range: fields
            .compare_at_price_range
            .map(convert_compare_at_price_range_list),
        rating: rating.filter(|r| r.count > 0),
    }
}

fn convert_image_list(i: get_products::ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

fn convert_money_list(m: get_products::MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

fn convert_price_range_list(r: get_products::ProductFieldsPriceRange) -> PriceRange {
    PriceRange {
        min_variant_price: convert_money_list(r.min_variant_price),
        max_variant_price: convert_money_list(r.max_variant_price),
    }
}

fn convert_compare_at_price_range_list(
    r: get_products::ProductFieldsCompareAtPriceRange,
) -> PriceRange {
    PriceRange {
        min_variant_price: Money {
            amount: r.min_variant_price.amount,
            currency_code: r.min_variant_price.currency_code,
        },
        max_variant_price: Money {
            amount: r.max_variant_price.amount,
            currency_code: r.max_variant_price.currency_code,
        },
    }
}

// =============================================================================
// GetProduct conversions
// =============================================================================

pub fn convert_product(product: get_product::GetProductProduct) -> Product {
    let (rating, reviews) = product.reviews.map_or((None, Vec::new()), |r| {
        let stats = ReviewStats {
            average: r.stats.average,
            count: r.stats.count,
        };
        let items = r.items.into_iter().map(convert_review).collect();
        (Some(stats).filter(|s| s.count > 0), items)
    });

    let images = product
        .images
        .edges
        .into_iter()
        .map(|e| convert_image_detail(e.node))
        .collect();

    let variants = product
        .variants
        .edges
        .into_iter()
        .map(|e| convert_variant_detail(e.node))
        .collect();

    let fields = product.product_fields;

    Product {
        id: fields.id,
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        description_html: fields.description_html,
        available_for_sale: fields.available_for_sale,
        product_type: fields.product_type,
        tags: fields.tags,
        created_at: fields.created_at,
        updated_at: fields.updated_at,
        featured_image: fields.featured_image.map(convert_image_detail),
        images,
        price_range: convert_price_range_detail(fields.price_range),
        compare_at_price_range: fields
            .compare_at_price_range
            .map(convert_compare_at_price_range_detail),
        variants,
        rating,
        reviews,
    }
}

fn convert_review(r: get_product::GetProductProductReviewsItems) -> Review {
    Review {
        id: r.id,
        reviewer: r.reviewer,
        rating: r.rating,
        title: r.title,
        body: r.body,
        created_at: r.created_at,
    }
}

fn convert_variant_detail(v: get_product::GetProductProductVariantsEdgesNode) -> ProductVariant {
    ProductVariant {
        id: v.id,
        name: v.name,
        available_for_sale: v.available_for_sale,
        price: convert_money_detail(v.price),
        compare_at_price: v.compare_at_price.map(convert_money_detail),
    }
}

fn convert_image_detail(i: get_product::ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

fn convert_money_detail(m: get_product::MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

fn convert_price_range_detail(r: get_product::ProductFieldsPriceRange) -> PriceRange {
    PriceRange {
        min_variant_price: convert_money_detail(r.min_variant_price),
        max_variant_price: convert_money_detail(r.max_variant_price),
    }
}

fn convert_compare_at_price_range_detail(
    r: get_product::ProductFieldsCompareAtPriceRange,
) -> PriceRange {
    PriceRange {
        min_variant_price: Money {
            amount: r.min_variant_price.amount,
            currency_code: r.min_variant_price.currency_code,
        },
        max_variant_price: Money {
            amount: r.max_variant_price.amount,
            currency_code: r.max_variant_price.currency_code,
        },
    }
}

// =============================================================================
// GetProductIds conversions
// =============================================================================

pub fn convert_product_refs(products: get_product_ids::GetProductIdsProducts) -> Vec<ProductRef> {
    products
        .edges
        .into_iter()
        .map(|e| ProductRef {
            id: e.node.id,
            slug: e.node.slug,
        })
        .collect()
}

// =============================================================================
// NewsletterSignup conversions
// =============================================================================

pub fn convert_signup_result(
    payload: newsletter_signup::NewsletterSignupNewsletterSignup,
) -> NewsletterSignupResult {
    NewsletterSignupResult {
        list_id: payload.list_id,
        subscribed: payload.subscribed,
        message: payload.message,
    }
}
