//! reqwest implementation of [`RemoteApi`].
//!
//! Requests are credentialed: the client keeps a cookie store so the session
//! cookie set by the login endpoints is sent on every call.

use std::sync::Arc;

use reqwest::Response;
use serde::de::DeserializeOwned;
use shopfront_core::{CartItems, Product, User, UserId};
use tracing::{debug, instrument};
use url::Url;

use super::{
    AckResponse, ApiError, CartUpdateRequest, ProductListResponse, RemoteApi, SellerAuthResponse,
    UserAuthResponse,
};
use crate::config::ClientConfig;

/// Maximum number of body characters kept in errors and logs.
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for the storefront API.
///
/// Cheaply cloneable; clones share the connection pool and cookie store.
#[derive(Clone)]
pub struct HttpApi {
    inner: Arc<HttpApiInner>,
}

struct HttpApiInner {
    client: reqwest::Client,
    endpoints: Endpoints,
}

/// Resolved endpoint URLs.
struct Endpoints {
    seller_auth: Url,
    user_auth: Url,
    product_list: Url,
    cart_update: Url,
}

impl Endpoints {
    fn resolve(base: &Url) -> Result<Self, ApiError> {
        // Joining relative paths keeps any prefix in the base URL, which
        // requires the base path to end in a slash.
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            seller_auth: base.join("api/seller/is-auth")?,
            user_auth: base.join("api/user/is-auth")?,
            product_list: base.join("api/product/list")?,
            cart_update: base.join("api/cart/update")?,
        })
    }
}

impl HttpApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URLs cannot be built or the HTTP
    /// client fails to initialize.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let endpoints = Endpoints::resolve(&config.backend_url)?;

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(HttpApiInner {
                client: builder.build()?,
                endpoints,
            }),
        })
    }

    /// GET a JSON document.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        read_json(response).await
    }
}

/// Check the status and parse the body of a response.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let url = response.url().clone();

    // Read the body as text first for better error diagnostics
    let text = response.text().await?;
    let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();

    if !status.is_success() {
        tracing::warn!(
            status = %status,
            url = %url,
            body = %preview,
            "Storefront API returned non-success status"
        );
        return Err(ApiError::Status {
            status,
            body: preview,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            url = %url,
            body = %preview,
            "Failed to parse storefront API response"
        );
        ApiError::Parse(e)
    })
}

impl RemoteApi for HttpApi {
    #[instrument(skip(self))]
    async fn seller_is_auth(&self) -> Result<bool, ApiError> {
        let response: SellerAuthResponse = self.get_json(&self.inner.endpoints.seller_auth).await?;
        debug!(success = response.success, "Seller auth checked");
        Ok(response.success)
    }

    #[instrument(skip(self))]
    async fn user_is_auth(&self) -> Result<Option<User>, ApiError> {
        let response: UserAuthResponse = self.get_json(&self.inner.endpoints.user_auth).await?;
        debug!(success = response.success, "User auth checked");
        Ok(response.into_user())
    }

    #[instrument(skip(self))]
    async fn product_list(&self) -> Result<Vec<Product>, ApiError> {
        let response: ProductListResponse =
            self.get_json(&self.inner.endpoints.product_list).await?;
        let products = response.into_products()?;
        debug!(count = products.len(), "Product list fetched");
        Ok(products)
    }

    #[instrument(skip(self, cart_items), fields(user_id = %user_id, lines = cart_items.len()))]
    async fn update_cart(&self, user_id: &UserId, cart_items: &CartItems) -> Result<(), ApiError> {
        let body = CartUpdateRequest {
            user_id,
            cart_items,
        };

        let response = self
            .inner
            .client
            .post(self.inner.endpoints.cart_update.clone())
            .json(&body)
            .send()
            .await?;

        let ack: AckResponse = read_json(response).await?;
        ack.into_result()
    }
}
