//! Integration tests for the reqwest API client.
//!
//! Each test starts its own fake backend on an ephemeral port.

use std::time::Duration;

use serde_json::json;
use shopfront_client::{ApiError, ClientConfig, HttpApi, RemoteApi};
use shopfront_core::{CartItems, ProductId, UserId};
use shopfront_integration_tests::{FakeBackend, product_json, user_json};

async fn api_for(backend: &FakeBackend) -> HttpApi {
    let url = backend.spawn().await;
    HttpApi::new(&ClientConfig::new(url)).expect("Failed to build API client")
}

// =============================================================================
// Auth Checks
// =============================================================================

#[tokio::test]
async fn test_seller_is_auth_reports_flag() {
    let backend = FakeBackend::new();
    backend.update(|s| s.seller = true);
    let api = api_for(&backend).await;

    assert!(api.seller_is_auth().await.expect("seller check"));

    backend.update(|s| s.seller = false);
    assert!(!api.seller_is_auth().await.expect("seller check"));
}

#[tokio::test]
async fn test_seller_is_auth_server_error_is_status_error() {
    let backend = FakeBackend::new();
    backend.update(|s| s.seller_error = true);
    let api = api_for(&backend).await;

    let err = api.seller_is_auth().await.expect_err("should fail");
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("exploded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_user_is_auth_anonymous() {
    let backend = FakeBackend::new();
    let api = api_for(&backend).await;

    assert!(api.user_is_auth().await.expect("user check").is_none());
}

#[tokio::test]
async fn test_user_is_auth_returns_user_with_cart() {
    let backend = FakeBackend::new();
    backend.update(|s| s.user = Some(user_json("u1", json!({"p1": 2, "p2": 0}))));
    let api = api_for(&backend).await;

    let user = api.user_is_auth().await.expect("user check").expect("user");
    assert_eq!(user.id.as_str(), "u1");
    assert_eq!(user.email.as_deref(), Some("test@example.com"));
    assert_eq!(user.cart_items.quantity("p1"), 2);
    // Zero quantities from the wire are dropped
    assert!(!user.cart_items.contains("p2"));
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_product_list_parses_catalog() {
    let backend = FakeBackend::new();
    backend.update(|s| {
        s.products = vec![
            product_json("p1", "Organic Potato", "Vegetables", 4.5, true),
            product_json("p2", "Red Apple", "Fruits", 9.995, false),
        ];
    });
    let api = api_for(&backend).await;

    let products = api.product_list().await.expect("catalog");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Organic Potato");
    assert_eq!(products[1].offer_price, rust_decimal::Decimal::new(9995, 3));
    assert!(!products[1].in_stock);
    assert_eq!(products[1].cover_image(), Some("https://cdn.test/p2.png"));
}

#[tokio::test]
async fn test_product_list_rejection_carries_message() {
    let backend = FakeBackend::new();
    backend.update(|s| s.product_list_error = Some("Catalog unavailable".to_string()));
    let api = api_for(&backend).await;

    let err = api.product_list().await.expect_err("should be rejected");
    assert!(matches!(err, ApiError::Rejected(ref m) if m == "Catalog unavailable"));
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    // Bind and immediately drop a listener to get a port nobody serves
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let url = url::Url::parse(&format!("http://127.0.0.1:{port}")).expect("url");
    let api = HttpApi::new(&ClientConfig::new(url)).expect("client");

    let err = api.product_list().await.expect_err("nothing listening");
    assert!(matches!(err, ApiError::Http(_)));
}

#[tokio::test]
async fn test_request_timeout_aborts_stalled_call() {
    let backend = FakeBackend::new();
    backend.update(|s| s.response_delay = Duration::from_secs(5));
    let mut config = ClientConfig::new(backend.spawn().await);
    config.request_timeout = Some(Duration::from_millis(200));
    let api = HttpApi::new(&config).expect("client");

    let err = api.product_list().await.expect_err("should time out");
    assert!(matches!(err, ApiError::Http(ref e) if e.is_timeout()));
}

// =============================================================================
// Cart Updates
// =============================================================================

#[tokio::test]
async fn test_update_cart_sends_user_and_items() {
    let backend = FakeBackend::new();
    let api = api_for(&backend).await;

    let cart: CartItems = [(ProductId::new("p1"), 3), (ProductId::new("p2"), 1)]
        .into_iter()
        .collect();
    api.update_cart(&UserId::new("u1"), &cart)
        .await
        .expect("cart update");

    let updates = backend.inspect(|s| s.cart_updates.clone());
    assert_eq!(
        updates,
        vec![json!({"userId": "u1", "cartItems": {"p1": 3, "p2": 1}})]
    );
}

#[tokio::test]
async fn test_update_cart_rejection() {
    let backend = FakeBackend::new();
    backend.update(|s| s.cart_update_error = Some("User not found".to_string()));
    let api = api_for(&backend).await;

    let err = api
        .update_cart(&UserId::new("ghost"), &CartItems::new())
        .await
        .expect_err("should be rejected");
    assert_eq!(err.to_string(), "User not found");
}
