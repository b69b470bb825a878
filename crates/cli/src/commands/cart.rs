//! Cart commands.
//!
//! Mutations apply to the session cart and, when signed in, are pushed to the
//! backend before the command exits.
//!
//! The binary has no login flow and starts with an empty cookie jar, so the
//! backend always sees an anonymous visitor here and the cart stays local to
//! the process. Signed-in synchronization is driven through
//! `SessionStore::set_user` by embedders that own the login.

use shopfront_client::SessionStore;
use tracing::{info, warn};

/// Log cart lines and totals.
pub fn show(session: &SessionStore) {
    let view = session.cart_view();

    if view.items.is_empty() {
        info!("Cart is empty");
    }

    for line in &view.items {
        info!(
            "{} x{}  {} @ {} = {}",
            line.id, line.quantity, line.name, line.unit_price, line.line_price
        );
    }

    let listed: u64 = view.items.iter().map(|line| u64::from(line.quantity)).sum();
    if listed < view.item_count {
        warn!(
            "{} items refer to products no longer in the catalog",
            view.item_count - listed
        );
    }

    info!("Items: {}  Subtotal: {}", view.item_count, view.subtotal);
}

/// Add `times` units of a product.
pub fn add(session: &SessionStore, id: &str, times: u32) {
    warn_if_unknown(session, id);
    for _ in 0..times {
        session.add_item(id);
    }
    show(session);
}

/// Set the quantity of a product.
pub fn set(session: &SessionStore, id: &str, quantity: u32) {
    warn_if_unknown(session, id);
    session.set_item_quantity(id, quantity);
    show(session);
}

/// Remove one unit of a product.
pub fn remove(session: &SessionStore, id: &str) {
    session.remove_item(id);
    show(session);
}

fn warn_if_unknown(session: &SessionStore, id: &str) {
    if session.product(id).is_none() {
        warn!("Product {id} is not in the catalog; it will not count toward the total");
    }
}
