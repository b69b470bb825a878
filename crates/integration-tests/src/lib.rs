//! Integration test support for Shopfront.
//!
//! [`FakeBackend`] serves the four storefront API endpoints from in-memory
//! state on an ephemeral local port, so the real `HttpApi` and
//! `SessionStore` can be exercised end to end without a live server.
//!
//! ```rust,ignore
//! let backend = FakeBackend::new();
//! backend.update(|s| s.products = vec![json!({...})]);
//! let url = backend.spawn().await;
//! let session: SessionStore = SessionStore::from_config(&ClientConfig::new(url))?;
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

/// Mutable state behind the fake endpoints.
#[derive(Debug, Default)]
pub struct BackendState {
    /// Answer for `GET /api/seller/is-auth`.
    pub seller: bool,
    /// Make the seller check fail with HTTP 500.
    pub seller_error: bool,
    /// Signed-in user document (`{ "_id", "cartItems", ... }`), if any.
    pub user: Option<Value>,
    /// Catalog served by `GET /api/product/list`.
    pub products: Vec<Value>,
    /// Reply to the catalog request with `success: false` and this message.
    pub product_list_error: Option<String>,
    /// Reply to cart updates with `success: false` and this message.
    pub cart_update_error: Option<String>,
    /// Every body received on `POST /api/cart/update`, in arrival order.
    pub cart_updates: Vec<Value>,
    /// Stall every response by this long.
    pub response_delay: Duration,
}

/// In-process stand-in for the storefront API server.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    /// Create a backend with an anonymous visitor and an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate the backend state.
    pub fn update(&self, f: impl FnOnce(&mut BackendState)) {
        f(&mut self.lock());
    }

    /// Read from the backend state.
    pub fn inspect<R>(&self, f: impl FnOnce(&BackendState) -> R) -> R {
        f(&self.lock())
    }

    /// Serve the API on `127.0.0.1` with an ephemeral port.
    ///
    /// Returns the base URL to configure the client with.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(&self) -> Url {
        let app = Router::new()
            .route("/api/seller/is-auth", get(seller_is_auth))
            .route("/api/user/is-auth", get(user_is_auth))
            .route("/api/product/list", get(product_list))
            .route("/api/cart/update", post(cart_update))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Listener has no local address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Url::parse(&format!("http://{addr}")).expect("Valid fake backend URL")
    }

    async fn stall(&self) {
        let delay = self.lock().response_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A product document in the backend's wire format.
#[must_use]
pub fn product_json(id: &str, name: &str, category: &str, offer_price: f64, in_stock: bool) -> Value {
    json!({
        "_id": id,
        "name": name,
        "category": category,
        "price": offer_price + 1.0,
        "offerPrice": offer_price,
        "inStock": in_stock,
        "description": [format!("{name} description")],
        "image": [format!("https://cdn.test/{id}.png")],
    })
}

/// A user document in the backend's wire format.
#[must_use]
pub fn user_json(id: &str, cart_items: Value) -> Value {
    json!({
        "_id": id,
        "name": "Test User",
        "email": "test@example.com",
        "cartItems": cart_items,
    })
}

// =============================================================================
// Handlers
// =============================================================================

async fn seller_is_auth(State(backend): State<FakeBackend>) -> Response {
    backend.stall().await;
    let state = backend.lock();
    if state.seller_error {
        return (StatusCode::INTERNAL_SERVER_ERROR, "seller check exploded").into_response();
    }
    Json(json!({ "success": state.seller })).into_response()
}

async fn user_is_auth(State(backend): State<FakeBackend>) -> Json<Value> {
    backend.stall().await;
    let state = backend.lock();
    Json(state.user.as_ref().map_or_else(
        || json!({ "success": false, "message": "Not Authorized" }),
        |user| json!({ "success": true, "user": user }),
    ))
}

async fn product_list(State(backend): State<FakeBackend>) -> Json<Value> {
    backend.stall().await;
    let state = backend.lock();
    Json(state.product_list_error.as_ref().map_or_else(
        || json!({ "success": true, "products": state.products }),
        |message| json!({ "success": false, "message": message }),
    ))
}

async fn cart_update(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Json<Value> {
    backend.stall().await;
    let mut state = backend.lock();
    state.cart_updates.push(body.clone());

    if let Some(message) = state.cart_update_error.clone() {
        return Json(json!({ "success": false, "message": message }));
    }

    // Persist the cart on the stored user so a later is-auth returns it
    let body_user = body.get("userId").cloned();
    if let Some(user) = state.user.as_mut()
        && user.get("_id").cloned() == body_user
        && let Some(cart) = body.get("cartItems")
    {
        user["cartItems"] = cart.clone();
    }

    Json(json!({ "success": true, "message": "Cart Updated" }))
}
