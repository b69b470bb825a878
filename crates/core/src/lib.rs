//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types used across all Shopfront components:
//! - `client` - Session store and remote API client
//! - `cli` - Command-line driver for a storefront session
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps cart arithmetic and catalog filtering
//! testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - IDs, products, users, cart items and price helpers
//! - [`catalog`] - Product grid filters (search, in-stock, best sellers)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
