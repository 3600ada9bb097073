//! Product catalog flow tests: listing, detail, create, edit, delete.
//!
//! The mock API records every request, so these tests pin down both the
//! rendered pages and the wire traffic: what was sent, how often, and what
//! was never sent at all.

use axum::http::StatusCode;
use serde_json::json;
use shopdesk_core::ProductFields;
use shopdesk_integration_tests::{
    FAILING_CREATE_TITLE, FAILING_DELETE_ID, get, post_form, sign_in, spawn_app,
};

/// A form body that passes every validation rule.
fn valid_product_form() -> String {
    [
        "title=Walnut+Desk",
        "description=A+sturdy+desk+made+of+solid+walnut.",
        "price=249.5",
        "discount_percentage=10",
        "rating=4.5",
        "stock=12",
        "brand=Oakline",
        "category=furniture",
        "thumbnail=https%3A%2F%2Fcdn.example.com%2Fdesk.png",
    ]
    .join("&")
}

/// The JSON the API should receive for `valid_product_form`.
fn expected_payload() -> serde_json::Value {
    json!({
        "title": "Walnut Desk",
        "description": "A sturdy desk made of solid walnut.",
        "price": 249.5,
        "discountPercentage": 10.0,
        "rating": 4.5,
        "stock": 12,
        "brand": "Oakline",
        "category": "furniture",
        "thumbnail": "https://cdn.example.com/desk.png"
    })
}

// ==== Listing & Detail Tests ====

#[tokio::test]
async fn test_listing_shows_catalog_cards() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/products", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Essence Mascara Lash Princess"));
    assert!(response.body.contains("Eyeshadow Palette with Mirror"));
    assert!(response.body.contains("$9.99"));
    assert_eq!(app.mock.count("GET", "/products"), 1);
}

#[tokio::test]
async fn test_listing_is_served_from_cache_on_revisit() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    get(&app.router, "/products", Some(&cookie)).await;
    get(&app.router, "/products", Some(&cookie)).await;

    assert_eq!(app.mock.count("GET", "/products"), 1);
}

#[tokio::test]
async fn test_detail_page_renders_product() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/products/2", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Eyeshadow Palette with Mirror"));
    assert!(response.body.contains("$19.99"));
}

#[tokio::test]
async fn test_missing_product_bounces_back_to_listing() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/products/9001", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/products?error=not_found"));
}

// ==== Edit Overlay Tests ====

#[tokio::test]
async fn test_edit_query_opens_prefilled_overlay() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/products?edit=2", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Edit product"));
    assert!(response.body.contains("/products/2/edit"));
    assert!(response.body.contains("value=\"Eyeshadow Palette with Mirror\""));
}

#[tokio::test]
async fn test_edit_query_for_unknown_product_is_ignored() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/products?edit=9001", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Edit product"));
}

// ==== Create Tests ====

#[tokio::test]
async fn test_new_product_form_starts_from_defaults() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = get(&app.router, "/new-product", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    let defaults = ProductFields::default();
    assert!(response.body.contains(&format!("value=\"{}\"", defaults.price)));

    // Rendering the form never touches the API
    assert!(app.mock.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_create_shows_field_error_without_network() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let body = valid_product_form().replace("title=Walnut+Desk", "title=ab");
    let response = post_form(&app.router, "/new-product", Some(&cookie), &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Title must be at least 3 characters"));
    // Entered values survive the round trip
    assert!(response.body.contains("value=\"ab\""));
    assert!(response.body.contains("value=\"Oakline\""));
    // The API never heard about it
    assert!(app.mock.requests().is_empty());
}

#[tokio::test]
async fn test_valid_create_posts_once_and_resets() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = post_form(&app.router, "/new-product", Some(&cookie), &valid_product_form()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/new-product?success=created"));

    // Exactly one create call, carrying the parsed payload
    let creates: Vec<_> = app
        .mock
        .requests()
        .into_iter()
        .filter(|request| request.method == "POST" && request.path == "/products/add")
        .collect();
    assert_eq!(creates.len(), 1);
    let sent = creates
        .first()
        .and_then(|request| request.body.clone())
        .expect("Create request carried no body");
    assert_eq!(sent, expected_payload());

    // Following the redirect lands on a clean form with a success banner
    let response = get(&app.router, "/new-product?success=created", Some(&cookie)).await;
    assert!(response.body.contains("Product created"));
    assert!(response.body.contains("value=\"0.1\""));
    assert!(!response.body.contains("Walnut Desk"));
}

#[tokio::test]
async fn test_rejected_create_keeps_entered_values() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let body = valid_product_form().replace("title=Walnut+Desk", "title=Rejected+Product");
    let response = post_form(&app.router, "/new-product", Some(&cookie), &body).await;

    // The upstream rejection surfaces as a banner, not a lost form
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Product payload rejected"));
    assert!(response.body.contains(&format!("value=\"{FAILING_CREATE_TITLE}\"")));
    assert_eq!(app.mock.count("POST", "/products/add"), 1);
}

// ==== Edit Tests ====

#[tokio::test]
async fn test_valid_edit_puts_once_and_closes_overlay() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response =
        post_form(&app.router, "/products/2/edit", Some(&cookie), &valid_product_form()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/products?success=updated"));

    let puts: Vec<_> = app
        .mock
        .requests()
        .into_iter()
        .filter(|request| request.method == "PUT" && request.path == "/products/2")
        .collect();
    assert_eq!(puts.len(), 1);
    let sent = puts
        .first()
        .and_then(|request| request.body.clone())
        .expect("Update request carried no body");
    assert_eq!(sent, expected_payload());

    let response = get(&app.router, "/products?success=updated", Some(&cookie)).await;
    assert!(response.body.contains("Product updated"));
}

#[tokio::test]
async fn test_invalid_edit_keeps_overlay_open_with_errors() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let body = valid_product_form().replace(
        "description=A+sturdy+desk+made+of+solid+walnut.",
        "description=short",
    );
    let response = post_form(&app.router, "/products/2/edit", Some(&cookie), &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Edit product"));
    assert!(response.body.contains("Description must be at least 10 characters"));
    // Entered values stay in the form
    assert!(response.body.contains("value=\"Walnut Desk\""));
    // No write went upstream
    assert_eq!(app.mock.count("PUT", "/products/2"), 0);
}

#[tokio::test]
async fn test_update_invalidates_cached_listing() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    get(&app.router, "/products", Some(&cookie)).await;
    assert_eq!(app.mock.count("GET", "/products"), 1);

    post_form(&app.router, "/products/2/edit", Some(&cookie), &valid_product_form()).await;

    // The next listing view refetches instead of serving the stale entry
    get(&app.router, "/products", Some(&cookie)).await;
    assert_eq!(app.mock.count("GET", "/products"), 2);
}

// ==== Delete Tests ====

#[tokio::test]
async fn test_delete_calls_api_once_and_reports_success() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let response = post_form(&app.router, "/products/1/delete", Some(&cookie), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/products?success=deleted"));
    assert_eq!(app.mock.count("DELETE", "/products/1"), 1);

    let response = get(&app.router, "/products?success=deleted", Some(&cookie)).await;
    assert!(response.body.contains("Product deleted"));
}

#[tokio::test]
async fn test_failed_delete_reports_error_and_keeps_listing() {
    let app = spawn_app().await;
    let cookie = sign_in(&app.router).await;

    let uri = format!("/products/{FAILING_DELETE_ID}/delete");
    let response = post_form(&app.router, &uri, Some(&cookie), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/products?error=delete_failed"));

    let response = get(&app.router, "/products?error=delete_failed", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Could not delete the product"));
    assert!(response.body.contains("Essence Mascara Lash Princess"));
}
