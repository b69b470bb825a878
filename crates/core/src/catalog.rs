//! Product grid filters.
//!
//! These are the list views the storefront renders over the cached catalog:
//! the searchable "All Products" grid, the best-seller strip on the home
//! page, and per-category pages. All of them preserve catalog order.

use crate::types::Product;

/// Number of products shown in the best-seller strip.
pub const BEST_SELLER_LIMIT: usize = 5;

/// Products whose name or category contains `query`, ignoring case.
///
/// An empty query matches everything.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products that are currently in stock.
pub fn in_stock<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    products.into_iter().filter(|p| p.in_stock).collect()
}

/// The "All Products" grid: search matches that are in stock.
#[must_use]
pub fn all_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    in_stock(search(products, query))
}

/// The first [`BEST_SELLER_LIMIT`] in-stock products.
#[must_use]
pub fn best_sellers(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.in_stock)
        .take(BEST_SELLER_LIMIT)
        .collect()
}

/// In-stock products of a category, compared case-insensitively.
///
/// Category paths are lower-cased in URLs while the catalog keeps the display
/// form, so `"fruits"` matches `"Fruits"`.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.in_stock && p.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Look up a product by identifier.
#[must_use]
pub fn find<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id.as_str() == id)
}
