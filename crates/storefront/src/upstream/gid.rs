//! Global-id helpers for upstream product identifiers.
//!
//! The mesh identifies products with global ids of the form
//! `gid://shopify/Product/6857243132004`, while storefront URLs use the bare
//! numeric id. These helpers convert between the two forms.

/// Prefix of product global ids.
const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

/// Build a product global id from a numeric route id.
#[must_use]
pub fn product_gid(id: u64) -> String {
    format!("{PRODUCT_GID_PREFIX}{id}")
}

/// Extract the numeric id from a product global id.
///
/// Returns `None` when the input is not a product gid or the trailing
/// segment is not numeric.
#[must_use]
pub fn parse_product_gid(gid: &str) -> Option<u64> {
    gid.strip_prefix(PRODUCT_GID_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_product_gid() {
        assert_eq!(
            product_gid(6_857_243_132_004),
            "gid://shopify/Product/6857243132004"
        );
    }

    #[test]
    fn parses_product_gid() {
        assert_eq!(
            parse_product_gid("gid://shopify/Product/6857243132004"),
            Some(6_857_243_132_004)
        );
    }

    #[test]
    fn rejects_foreign_gids() {
        assert_eq!(parse_product_gid("gid://shopify/Collection/1"), None);
        assert_eq!(parse_product_gid("gid://shopify/Product/abc"), None);
        assert_eq!(parse_product_gid("6857243132004"), None);
    }

    #[test]
    fn round_trips() {
        let gid = product_gid(42);
        assert_eq!(parse_product_gid(&gid), Some(42));
    }
}
