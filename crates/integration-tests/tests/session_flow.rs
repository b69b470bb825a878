//! End-to-end session store tests over real HTTP.
//!
//! These cover the startup fetch sequence, cart synchronization and the
//! failure notifications a view would render.

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_client::notify::drain;
use shopfront_client::{
    AuthState, ClientConfig, Notification, NotificationLevel, SessionStore,
};
use shopfront_integration_tests::{FakeBackend, product_json, user_json};

async fn session_for(backend: &FakeBackend) -> SessionStore {
    let url = backend.spawn().await;
    let mut config = ClientConfig::new(url);
    config.currency = "$".to_string();
    SessionStore::from_config(&config).expect("Failed to build session")
}

fn grocery_catalog() -> Vec<serde_json::Value> {
    vec![
        product_json("a", "Apple Box", "Fruits", 9.995, true),
        product_json("b", "Brown Bread", "Bakery", 4.50, true),
        product_json("c", "Carrots", "Vegetables", 2.25, false),
    ]
}

// =============================================================================
// Initialization
// =============================================================================

#[tokio::test]
async fn test_initialize_signed_in_customer() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.products = grocery_catalog();
        s.user = Some(user_json("u1", json!({"a": 2, "b": 1})));
    });
    let session = session_for(&backend).await;

    session.initialize().await;

    assert!(session.auth_state().is_authenticated());
    assert!(!session.is_seller());
    assert_eq!(session.products().len(), 3);
    assert_eq!(session.cart_count(), 3);
    assert_eq!(session.cart_total(), Decimal::new(2449, 2));

    let view = session.cart_view();
    assert_eq!(view.subtotal, "$24.49");
    assert_eq!(view.items.len(), 2);
}

#[tokio::test]
async fn test_initialize_seller_failure_keeps_user() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.seller_error = true;
        s.user = Some(user_json("u1", json!({})));
    });
    let session = session_for(&backend).await;
    let mut rx = session.notifier().subscribe();

    session.initialize().await;

    assert!(!session.is_seller());
    assert_eq!(session.user().map(|u| u.id.to_string()), Some("u1".to_string()));
    // Auth failures are never shown to the user
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_initialize_seller_without_customer() {
    let backend = FakeBackend::new();
    backend.update(|s| s.seller = true);
    let session = session_for(&backend).await;

    session.initialize().await;

    assert!(session.is_seller());
    assert_eq!(session.auth_state(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_initialize_catalog_rejection_notifies() {
    let backend = FakeBackend::new();
    backend.update(|s| s.product_list_error = Some("Catalog unavailable".to_string()));
    let session = session_for(&backend).await;
    let mut rx = session.notifier().subscribe();

    session.initialize().await;

    assert!(session.products().is_empty());
    assert_eq!(
        drain(&mut rx),
        vec![Notification::error("Catalog unavailable")]
    );
}

#[tokio::test]
async fn test_initialize_completes_when_backend_stalls() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.products = grocery_catalog();
        s.response_delay = Duration::from_secs(5);
    });
    let mut config = ClientConfig::new(backend.spawn().await);
    config.request_timeout = Some(Duration::from_millis(200));
    let session: SessionStore = SessionStore::from_config(&config).expect("session");
    let mut rx = session.notifier().subscribe();

    tokio::time::timeout(Duration::from_secs(3), session.initialize())
        .await
        .expect("initialize should finish once requests time out");

    assert_eq!(session.auth_state(), AuthState::Anonymous);
    assert!(!session.is_seller());
    assert!(session.products().is_empty());
    let errors: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|n| n.level == NotificationLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// Cart Synchronization
// =============================================================================

#[tokio::test]
async fn test_cart_mutations_are_persisted_in_order() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.products = grocery_catalog();
        s.user = Some(user_json("u1", json!({})));
    });
    let session = session_for(&backend).await;
    session.initialize().await;

    session.add_item("a");
    session.add_item("b");
    session.set_item_quantity("a", 3);
    session.remove_item("b");
    session.flush().await;

    let carts: Vec<_> = backend.inspect(|s| {
        s.cart_updates
            .iter()
            .map(|body| {
                assert_eq!(body["userId"], "u1");
                body["cartItems"].clone()
            })
            .collect()
    });
    assert_eq!(
        carts,
        vec![
            json!({"a": 1}),
            json!({"a": 1, "b": 1}),
            json!({"a": 3, "b": 1}),
            json!({"a": 3}),
        ]
    );

    // A fresh session sees the persisted cart
    let second = session_for(&backend).await;
    second.initialize().await;
    assert_eq!(second.cart().quantity("a"), 3);
    assert!(!second.cart().contains("b"));
}

#[tokio::test]
async fn test_anonymous_cart_stays_local() {
    let backend = FakeBackend::new();
    backend.update(|s| s.products = grocery_catalog());
    let session = session_for(&backend).await;
    session.initialize().await;

    session.add_item("b");
    session.add_item("b");
    session.flush().await;

    assert!(backend.inspect(|s| s.cart_updates.is_empty()));
    assert_eq!(session.cart_total(), Decimal::new(9, 0));
}

#[tokio::test]
async fn test_rejected_push_notifies_and_keeps_local_cart() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.products = grocery_catalog();
        s.user = Some(user_json("u1", json!({})));
        s.cart_update_error = Some("Cart could not be saved".to_string());
    });
    let session = session_for(&backend).await;
    session.initialize().await;
    let mut rx = session.notifier().subscribe();

    session.add_item("a");
    session.flush().await;

    assert_eq!(session.cart().quantity("a"), 1);
    let notifications = drain(&mut rx);
    assert_eq!(
        notifications
            .iter()
            .map(|n| (n.level, n.message.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (NotificationLevel::Success, "Added to cart"),
            (NotificationLevel::Error, "Cart could not be saved"),
        ]
    );
}

#[tokio::test]
async fn test_logout_stops_pushing() {
    let backend = FakeBackend::new();
    backend.update(|s| s.user = Some(user_json("u1", json!({"a": 1}))));
    let session = session_for(&backend).await;
    session.initialize().await;

    session.reset();
    session.add_item("a");
    session.flush().await;

    assert!(backend.inspect(|s| s.cart_updates.is_empty()));
    assert_eq!(session.cart().quantity("a"), 1);
}
