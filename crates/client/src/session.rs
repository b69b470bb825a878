//! Client session store.
//!
//! [`SessionStore`] is the single source of truth for a storefront session:
//! who is signed in, whether they are a seller, the cached product catalog,
//! the shopping cart and a couple of transient UI flags. It is an explicit
//! context object handed to views, created once at startup and reset only on
//! logout.
//!
//! # Remote synchronization
//!
//! Cart mutations apply locally and return immediately. While a user is
//! signed in, each mutation also queues a push of the whole cart to the
//! remote API. Pushes are optimistic: a failed push raises an error
//! notification but the local cart is not rolled back. Another device
//! pushing in between can still be overwritten (last write wins).
//!
//! # Example
//!
//! ```rust,ignore
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::from_config(&config)?;
//! let mut toasts = session.notifier().subscribe();
//!
//! session.initialize().await;
//! session.add_item("6650f1c2a9");
//! println!("{} items, total {}", session.cart_count(), session.cart_total());
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use shopfront_core::{CartItems, Product, ProductId, User, cart_count, cart_total, catalog};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, HttpApi, RemoteApi};
use crate::config::ClientConfig;
use crate::notify::Notifier;
use crate::sync::CartSync;
use crate::views::CartView;

/// User authentication state.
///
/// `Anonymous → Authenticating → {Authenticated, Anonymous}`. Seller
/// authorization is tracked separately and does not gate this machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(User),
}

impl AuthState {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous | Self::Authenticating => None,
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug, Default)]
struct SessionState {
    auth: AuthState,
    is_seller: bool,
    products: Vec<Product>,
    cart: CartItems,
    show_user_login: bool,
    search_query: String,
}

/// Storefront session store.
///
/// Cheaply cloneable via `Arc`; clones share state. Must be created inside a
/// tokio runtime because it spawns the cart sync worker.
pub struct SessionStore<A = HttpApi> {
    inner: Arc<SessionInner<A>>,
}

struct SessionInner<A> {
    api: Arc<A>,
    notifier: Notifier,
    sync: CartSync,
    currency: String,
    state: RwLock<SessionState>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SessionStore<HttpApi> {
    /// Create a session backed by the HTTP API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = HttpApi::new(config)?;
        Ok(Self::new(api, Notifier::new(), config.currency.clone()))
    }
}

impl<A: RemoteApi> SessionStore<A> {
    /// Create an empty, anonymous session.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(api: A, notifier: Notifier, currency: impl Into<String>) -> Self {
        let api = Arc::new(api);
        let sync = CartSync::spawn(Arc::clone(&api), notifier.clone());

        Self {
            inner: Arc::new(SessionInner {
                api,
                notifier,
                sync,
                currency: currency.into(),
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Load seller status, user status with their cart, and the catalog.
    ///
    /// The three requests run concurrently and each applies its own result as
    /// soon as it arrives. Auth check failures leave the session
    /// unauthenticated without telling the user; a catalog failure raises an
    /// error notification.
    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        tokio::join!(self.load_seller(), self.load_user(), self.refresh_products());
        info!(
            authenticated = self.auth_state().is_authenticated(),
            seller = self.is_seller(),
            products = self.read().products.len(),
            "Session initialized"
        );
    }

    async fn load_seller(&self) {
        let is_seller = match self.inner.api.seller_is_auth().await {
            Ok(is_seller) => is_seller,
            Err(e) => {
                debug!(error = %e, "Seller auth check failed");
                false
            }
        };
        self.write().is_seller = is_seller;
    }

    async fn load_user(&self) {
        self.write().auth = AuthState::Authenticating;

        let user = match self.inner.api.user_is_auth().await {
            Ok(user) => user,
            Err(e) => {
                debug!(error = %e, "User auth check failed");
                None
            }
        };

        let mut state = self.write();
        match user {
            Some(user) => {
                debug!(user_id = %user.id, lines = user.cart_items.len(), "User authenticated");
                state.cart = user.cart_items.clone();
                state.auth = AuthState::Authenticated(user);
            }
            None => state.auth = AuthState::Anonymous,
        }
    }

    /// Re-fetch the product catalog.
    ///
    /// On failure the current catalog is kept and an error notification is
    /// raised.
    pub async fn refresh_products(&self) {
        match self.inner.api.product_list().await {
            Ok(products) => {
                debug!(count = products.len(), "Catalog loaded");
                self.write().products = products;
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                self.inner.notifier.error(e.to_string());
            }
        }
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    pub fn add_item(&self, id: impl Into<ProductId>) {
        let id = id.into();
        self.mutate_cart(|cart| {
            let quantity = cart.add(id.clone());
            debug!(product_id = %id, quantity, "Added to cart");
            true
        });
        self.inner.notifier.success("Added to cart");
    }

    /// Set the exact quantity of a product. A quantity of 0 removes it.
    pub fn set_item_quantity(&self, id: impl Into<ProductId>, quantity: u32) {
        let id = id.into();
        self.mutate_cart(|cart| {
            let changed = cart.quantity(id.as_str()) != quantity;
            cart.set(id.clone(), quantity);
            debug!(product_id = %id, quantity, "Cart quantity set");
            changed
        });
        self.inner.notifier.success("Cart updated");
    }

    /// Remove one unit of a product; the entry disappears at 0.
    ///
    /// Removing a product that is not in the cart changes nothing but still
    /// reports success.
    pub fn remove_item(&self, id: impl Into<ProductId>) {
        let id = id.into();
        self.mutate_cart(|cart| {
            let remaining = cart.remove(id.as_str());
            debug!(product_id = %id, ?remaining, "Removed from cart");
            remaining.is_some()
        });
        self.inner.notifier.success("Removed from cart");
    }

    /// Apply `f` to the cart and queue a push if it reports a change.
    ///
    /// The push is queued while the write lock is held so pushes reach the
    /// worker in mutation order.
    fn mutate_cart(&self, f: impl FnOnce(&mut CartItems) -> bool) {
        let mut state = self.write();
        if !f(&mut state.cart) {
            return;
        }

        if let Some(user) = state.auth.user() {
            self.inner.sync.push(user.id.clone(), state.cart.clone());
        }
    }

    /// Wait until every cart push queued so far has completed.
    pub async fn flush(&self) {
        self.inner.sync.flush().await;
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Record the result of a user login or logout.
    ///
    /// A signed-in user's remembered cart becomes the session cart. No push is
    /// queued for it, since that cart is what the backend already holds; the
    /// next cart mutation pushes as usual.
    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.write();
        match user {
            Some(user) => {
                state.cart = user.cart_items.clone();
                state.auth = AuthState::Authenticated(user);
                state.show_user_login = false;
            }
            None => state.auth = AuthState::Anonymous,
        }
    }

    /// Record the result of a seller login or logout.
    pub fn set_seller(&self, is_seller: bool) {
        self.write().is_seller = is_seller;
    }

    /// Log out: forget the user, seller flag, cart and UI flags.
    ///
    /// The catalog is kept since it does not depend on identity.
    pub fn reset(&self) {
        let mut state = self.write();
        let products = std::mem::take(&mut state.products);
        *state = SessionState {
            products,
            ..SessionState::default()
        };
        info!("Session reset");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.read().auth.clone()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().auth.user().cloned()
    }

    /// Whether the session holds seller authorization.
    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.read().is_seller
    }

    /// Snapshot of the product catalog.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Snapshot of the cart.
    #[must_use]
    pub fn cart(&self) -> CartItems {
        self.read().cart.clone()
    }

    /// Sum of all cart quantities.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        cart_count(&self.read().cart)
    }

    /// Cart total at offer prices, floored to cents.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        let state = self.read();
        cart_total(&state.cart, &state.products)
    }

    /// Cart page projection.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        let state = self.read();
        CartView::build(&state.cart, &state.products, &self.inner.currency)
    }

    /// Display currency symbol.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.inner.currency
    }

    /// The notification channel views subscribe to.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Whether the login modal is open.
    #[must_use]
    pub fn show_user_login(&self) -> bool {
        self.read().show_user_login
    }

    /// Open or close the login modal.
    pub fn set_show_user_login(&self, show: bool) {
        self.write().show_user_login = show;
    }

    /// Current search box contents.
    #[must_use]
    pub fn search_query(&self) -> String {
        self.read().search_query.clone()
    }

    /// Update the search box contents.
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.write().search_query = query.into();
    }

    // =========================================================================
    // Catalog Views
    // =========================================================================

    /// In-stock products matching the current search query.
    #[must_use]
    pub fn all_products(&self) -> Vec<Product> {
        let state = self.read();
        catalog::all_products(&state.products, &state.search_query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Best-seller strip.
    #[must_use]
    pub fn best_sellers(&self) -> Vec<Product> {
        catalog::best_sellers(&self.read().products)
            .into_iter()
            .cloned()
            .collect()
    }

    /// In-stock products of a category.
    #[must_use]
    pub fn products_in_category(&self, category: &str) -> Vec<Product> {
        catalog::by_category(&self.read().products, category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up a product in the catalog.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<Product> {
        catalog::find(&self.read().products, id).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
