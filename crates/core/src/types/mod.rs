//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the storefront domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::{CartItems, cart_count, cart_total, line_total};
pub use id::*;
pub use price::{floor_to_cents, format_price};
pub use product::Product;
pub use user::User;
