//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as listed by the remote catalog.
///
/// Products are immutable from the client's perspective: the whole catalog is
/// replaced on every fetch. The wire identifier is `_id`; a plain `id` is
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category used for grouping and search (e.g. "Vegetables").
    pub category: String,
    /// List price.
    pub price: Decimal,
    /// Discounted unit price used for cart totals.
    pub offer_price: Decimal,
    /// Whether the product can currently be bought.
    #[serde(default)]
    pub in_stock: bool,
    /// Description paragraphs.
    #[serde(default)]
    pub description: Vec<String>,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub image: Vec<String>,
}

impl Product {
    /// The product's cover image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.image.first().map(String::as_str)
    }
}
