//! Shopfront client library.
//!
//! Holds the client-side state of a storefront session (identity, seller
//! flag, product catalog and cart) and keeps the cart in sync with the
//! remote API.
//!
//! # Modules
//!
//! - [`api`] - Remote API trait and its reqwest implementation
//! - [`config`] - Environment configuration
//! - [`notify`] - Success/error toast channel for views
//! - [`session`] - The session store
//! - [`views`] - Display projections (cart page)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod notify;
pub mod session;
mod sync;
pub mod views;

pub use api::{ApiError, HttpApi, RemoteApi};
pub use config::{ClientConfig, ConfigError};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use session::{AuthState, SessionStore};
pub use views::{CartLineView, CartView};
