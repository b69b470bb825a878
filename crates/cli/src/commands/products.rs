//! Catalog listing.

use shopfront_client::SessionStore;
use shopfront_core::{Product, format_price};
use tracing::info;

/// List products the way the storefront grids would show them.
pub fn list(
    session: &SessionStore,
    search: Option<String>,
    category: Option<&str>,
    best_sellers: bool,
) {
    let products = if best_sellers {
        session.best_sellers()
    } else if let Some(category) = category {
        session.products_in_category(category)
    } else {
        session.set_search_query(search.unwrap_or_default());
        session.all_products()
    };

    if products.is_empty() {
        info!("No products found");
        return;
    }

    for product in &products {
        log_product(session.currency(), product);
    }
    info!("{} products", products.len());
}

fn log_product(currency: &str, product: &Product) {
    let price = if product.offer_price < product.price {
        format!(
            "{} (was {})",
            format_price(currency, product.offer_price),
            format_price(currency, product.price)
        )
    } else {
        format_price(currency, product.offer_price)
    };

    info!("{}  {} [{}]  {price}", product.id, product.name, product.category);
}
