//! Cache value types for catalog API responses.

use crate::upstream::types::{Product, ProductConnection, ProductRef};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
    ProductRefs(Vec<ProductRef>),
}
