//! Session status report.

use shopfront_client::{AuthState, SessionStore};
use shopfront_core::format_price;
use tracing::info;

/// Log authentication, seller and cart summary.
pub fn show(session: &SessionStore) {
    match session.auth_state() {
        AuthState::Authenticated(user) => {
            let name = user.name.as_deref().unwrap_or("(no name)");
            info!("Signed in as {name} [{}]", user.id);
        }
        AuthState::Anonymous | AuthState::Authenticating => info!("Not signed in"),
    }

    info!(
        "Seller access: {}",
        if session.is_seller() { "yes" } else { "no" }
    );
    info!("Catalog: {} products", session.products().len());
    info!(
        "Cart: {} items, {}",
        session.cart_count(),
        format_price(session.currency(), session.cart_total())
    );
}
