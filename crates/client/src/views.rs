//! Display projections for views.

use rust_decimal::Decimal;
use shopfront_core::{CartItems, Product, ProductId, cart_total, catalog, format_price, line_total};

/// A cart line ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Cart page data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Lines for products still in the catalog, in cart order.
    pub items: Vec<CartLineView>,
    /// Floored cart total, formatted.
    pub subtotal: String,
    /// Sum of all quantities, including products missing from the catalog.
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: &str) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(currency, Decimal::ZERO),
            item_count: 0,
        }
    }

    /// Project a cart against the catalog.
    #[must_use]
    pub fn build(cart: &CartItems, products: &[Product], currency: &str) -> Self {
        let items = cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = catalog::find(products, id.as_str())?;
                Some(CartLineView {
                    id: id.clone(),
                    name: product.name.clone(),
                    category: product.category.clone(),
                    image: product.cover_image().map(str::to_owned),
                    quantity,
                    unit_price: format_price(currency, product.offer_price),
                    line_price: format_price(currency, line_total(product, quantity)),
                })
            })
            .collect();

        Self {
            items,
            subtotal: format_price(currency, cart_total(cart, products)),
            item_count: cart.count(),
        }
    }
}
