//! Shopping cart contents and derived values.
//!
//! A cart maps product identifiers to quantities. Every stored quantity is at
//! least 1: operations that would bring an entry to 0 remove it instead, and
//! zero entries received over the wire are dropped on deserialization.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::floor_to_cents;
use super::product::Product;

/// Product identifier to quantity mapping.
///
/// Serializes as a plain JSON object, e.g. `{"p1": 2, "p2": 1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<ProductId, u32>",
    into = "BTreeMap<ProductId, u32>"
)]
pub struct CartItems(BTreeMap<ProductId, u32>);

impl CartItems {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Quantity of a product, 0 when absent.
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Iterate over `(product, quantity)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.0.iter().map(|(id, qty)| (id, *qty))
    }

    /// Increment a product's quantity by one, creating the entry at 1.
    ///
    /// Returns the new quantity.
    pub fn add(&mut self, id: ProductId) -> u32 {
        let qty = self.0.entry(id).or_insert(0);
        *qty = qty.saturating_add(1);
        *qty
    }

    /// Set a product's quantity exactly. A quantity of 0 removes the entry.
    pub fn set(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.0.remove(&id);
        } else {
            self.0.insert(id, quantity);
        }
    }

    /// Decrement a product's quantity by one, removing the entry at 0.
    ///
    /// Returns the remaining quantity, or `None` if the product was not in
    /// the cart (in which case nothing changes).
    pub fn remove(&mut self, id: &str) -> Option<u32> {
        let qty = self.0.get_mut(id)?;
        *qty -= 1;
        let remaining = *qty;
        if remaining == 0 {
            self.0.remove(id);
        }
        Some(remaining)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.0.values().map(|&qty| u64::from(qty)).sum()
    }
}

impl From<BTreeMap<ProductId, u32>> for CartItems {
    fn from(mut map: BTreeMap<ProductId, u32>) -> Self {
        map.retain(|_, qty| *qty > 0);
        Self(map)
    }
}

impl From<CartItems> for BTreeMap<ProductId, u32> {
    fn from(items: CartItems) -> Self {
        items.0
    }
}

impl FromIterator<(ProductId, u32)> for CartItems {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

/// Total number of items in the cart (sum of quantities).
#[must_use]
pub fn cart_count(items: &CartItems) -> u64 {
    items.count()
}

/// Price of `quantity` units of `product` at its offer price.
///
/// Saturates at the [`Decimal`] bounds instead of overflowing.
#[must_use]
pub fn line_total(product: &Product, quantity: u32) -> Decimal {
    product.offer_price.saturating_mul(Decimal::from(quantity))
}

/// Total price of the cart, floored to whole cents.
///
/// Each entry contributes `offer_price * quantity` of the first catalog
/// product with a matching identifier. Entries whose product is no longer in
/// the catalog contribute nothing. The sum saturates at the [`Decimal`]
/// bounds.
#[must_use]
pub fn cart_total(items: &CartItems, products: &[Product]) -> Decimal {
    let total = items
        .iter()
        .filter_map(|(id, qty)| {
            products
                .iter()
                .find(|product| product.id == *id)
                .map(|product| line_total(product, qty))
        })
        .fold(Decimal::ZERO, Decimal::saturating_add);

    floor_to_cents(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, offer_price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            category: "Test".to_string(),
            price: offer_price,
            offer_price,
            in_stock: true,
            description: Vec::new(),
            image: Vec::new(),
        }
    }

    #[test]
    fn test_total_saturates_on_huge_prices() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let products = vec![product("a", huge), product("b", huge)];
        let cart: CartItems = [(ProductId::new("a"), 10), (ProductId::new("b"), 1)]
            .into_iter()
            .collect();

        assert_eq!(line_total(&products[0], 10), Decimal::MAX);
        assert_eq!(cart_total(&cart, &products), Decimal::MAX);
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = CartItems::new();
        assert_eq!(cart.add(ProductId::new("x")), 1);
        assert_eq!(cart.add(ProductId::new("x")), 2);
        assert_eq!(cart.quantity("x"), 2);
    }

    #[test]
    fn test_add_then_remove_leaves_empty_cart() {
        let mut cart = CartItems::new();
        cart.add(ProductId::new("x"));
        assert_eq!(cart.remove("x"), Some(0));
        assert!(cart.is_empty());
        assert!(!cart.contains("x"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartItems::new();
        cart.add(ProductId::new("a"));
        let before = cart.clone();
        assert_eq!(cart.remove("missing"), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_without_prior_add() {
        let mut cart = CartItems::new();
        cart.set(ProductId::new("x"), 3);
        assert_eq!(cart.quantity("x"), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_zero_removes_entry() {
        let mut cart = CartItems::new();
        cart.set(ProductId::new("x"), 4);
        cart.set(ProductId::new("x"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_zero_entries_after_mixed_sequence() {
        let mut cart = CartItems::new();
        let ops: &[(&str, bool)] = &[
            ("a", true),
            ("b", true),
            ("a", true),
            ("a", false),
            ("b", false),
            ("b", false),
            ("c", false),
            ("a", false),
            ("c", true),
        ];

        let mut expected_count = 0_u64;
        for &(id, add) in ops {
            if add {
                cart.add(ProductId::new(id));
                expected_count += 1;
            } else if cart.remove(id).is_some() {
                expected_count -= 1;
            }
            assert!(cart.iter().all(|(_, qty)| qty >= 1));
            assert_eq!(cart.count(), expected_count);
        }

        assert_eq!(cart.quantity("c"), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_count_sums_quantities() {
        let cart: CartItems = [(ProductId::new("a"), 2), (ProductId::new("b"), 5)]
            .into_iter()
            .collect();
        assert_eq!(cart_count(&cart), 7);
    }

    #[test]
    fn test_total_floors_exact_decimal_sum() {
        let products = vec![
            product("a", Decimal::new(9995, 3)),
            product("b", Decimal::new(450, 2)),
        ];
        let cart: CartItems = [(ProductId::new("a"), 2), (ProductId::new("b"), 1)]
            .into_iter()
            .collect();

        assert_eq!(cart_total(&cart, &products), Decimal::new(2449, 2));
    }

    #[test]
    fn test_total_floors_fractional_cents() {
        let products = vec![product("a", Decimal::new(3333, 3))];
        let cart: CartItems = [(ProductId::new("a"), 1)].into_iter().collect();
        assert_eq!(cart_total(&cart, &products), Decimal::new(333, 2));
    }

    #[test]
    fn test_total_ignores_items_missing_from_catalog() {
        let products = vec![product("a", Decimal::new(2, 0))];
        let cart: CartItems = [(ProductId::new("a"), 3), (ProductId::new("gone"), 10)]
            .into_iter()
            .collect();
        assert_eq!(cart_total(&cart, &products), Decimal::new(6, 0));
    }

    #[test]
    fn test_wire_format_drops_zero_quantities() {
        let cart: CartItems =
            serde_json::from_str(r#"{"a":2,"b":0,"c":1}"#).expect("valid cart json");
        assert_eq!(cart.len(), 2);
        assert!(!cart.contains("b"));

        let json = serde_json::to_value(&cart).expect("serialize");
        assert_eq!(json, serde_json::json!({"a": 2, "c": 1}));
    }
}
