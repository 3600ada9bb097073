//! Smoke tests against the live demo API.
//!
//! These tests require network access to dummyjson.com and are ignored by
//! default. Run them with:
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests -- --ignored
//! ```

use shopdesk_admin::config::DummyJsonConfig;
use shopdesk_admin::dummyjson::DummyJsonClient;
use shopdesk_core::ProductId;

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_product_listing() {
    let client = DummyJsonClient::new(&DummyJsonConfig::default());

    let page = client
        .get_products()
        .await
        .expect("Failed to fetch products");
    assert!(page.total > 0);
    assert!(!page.products.is_empty());
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_product_detail() {
    let client = DummyJsonClient::new(&DummyJsonConfig::default());

    let product = client
        .get_product(ProductId::new(1))
        .await
        .expect("Failed to fetch product");
    assert_eq!(product.id, ProductId::new(1));
    assert!(!product.title.is_empty());
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_missing_product_is_not_found() {
    let client = DummyJsonClient::new(&DummyJsonConfig::default());

    let result = client.get_product(ProductId::new(0)).await;
    assert!(matches!(
        result,
        Err(shopdesk_admin::dummyjson::DummyJsonError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_users_paging() {
    let client = DummyJsonClient::new(&DummyJsonConfig::default());

    let page = client.get_users(12, 0).await.expect("Failed to fetch users");
    assert_eq!(page.limit, 12);
    assert_eq!(page.users.len(), 12);
    assert!(page.total > 0);
}
