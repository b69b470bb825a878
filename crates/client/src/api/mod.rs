//! Remote storefront API.
//!
//! # Endpoints
//!
//! - `GET /api/seller/is-auth` - seller authorization status
//! - `GET /api/user/is-auth` - user authorization status and remembered cart
//! - `GET /api/product/list` - product catalog
//! - `POST /api/cart/update` - persist a user's cart
//!
//! Every response carries a `success` flag. A `success: false` catalog or
//! cart response becomes [`ApiError::Rejected`] with the server's message;
//! for the auth checks it simply means "not authenticated".
//!
//! [`RemoteApi`] is the seam the session store depends on; [`HttpApi`] is the
//! reqwest implementation.

mod http;

pub use http::HttpApi;

use std::future::Future;

use serde::{Deserialize, Serialize};
use shopfront_core::{CartItems, Product, User, UserId};
use thiserror::Error;

/// Message used when the server rejects a request without saying why.
const DEFAULT_REJECTION: &str = "Request was not successful";

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code.
    #[error("Server returned {status}: {body}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Server responded with `success: false`.
    #[error("{0}")]
    Rejected(String),
}

/// Operations the session store needs from the remote service.
///
/// Implementations must be shareable across tasks: cart pushes run on a
/// background worker.
pub trait RemoteApi: Send + Sync + 'static {
    /// Whether the current credentials belong to an authorized seller.
    fn seller_is_auth(&self) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// The authenticated user with their persisted cart, or `None`.
    fn user_is_auth(&self) -> impl Future<Output = Result<Option<User>, ApiError>> + Send;

    /// The full product catalog.
    fn product_list(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Replace the persisted cart of `user_id` with `cart_items`.
    fn update_cart(
        &self,
        user_id: &UserId,
        cart_items: &CartItems,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

// =============================================================================
// Wire Types
// =============================================================================

/// `GET /api/seller/is-auth` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerAuthResponse {
    pub success: bool,
}

/// `GET /api/user/is-auth` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAuthResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl UserAuthResponse {
    /// The user if the check succeeded.
    #[must_use]
    pub fn into_user(self) -> Option<User> {
        if self.success { self.user } else { None }
    }
}

/// `GET /api/product/list` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProductListResponse {
    /// The products, or [`ApiError::Rejected`] if the server refused.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when `success` is false.
    pub fn into_products(self) -> Result<Vec<Product>, ApiError> {
        if self.success {
            Ok(self.products)
        } else {
            Err(rejected(self.message))
        }
    }
}

/// `POST /api/cart/update` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateRequest<'a> {
    pub user_id: &'a UserId,
    pub cart_items: &'a CartItems,
}

/// Generic `{ success, message? }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckResponse {
    /// `Ok(())` on success, [`ApiError::Rejected`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when `success` is false.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(rejected(self.message))
        }
    }
}

fn rejected(message: Option<String>) -> ApiError {
    ApiError::Rejected(
        message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
    )
}
