//! Integration tests for the shopper-facing storefront API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (cargo run -p minimart-cli -- seed)
//! - The storefront server running (cargo run -p minimart-storefront)
//!
//! Run with: cargo test -p minimart-integration-tests -- --ignored

use minimart_integration_tests::{client, registered_shopper, storefront_base_url, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_register_login_and_profile() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "name": "Integration Shopper",
            "email": email,
            "password": "correct horse battery staple",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let profile: Value = resp.json().await.expect("Failed to parse profile");
    assert_eq!(profile["email"], email.as_str());
    assert_eq!(profile["wallet"], "0.00");

    // Duplicate registration is rejected
    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "name": "Integration Shopper",
            "email": email,
            "password": "correct horse battery staple",
        }))
        .send()
        .await
        .expect("Failed to send duplicate registration");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Session cookie from registration authenticates /auth/me
    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get profile");
    assert_eq!(resp.status(), StatusCode::OK);

    // Logout clears the session
    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get profile after logout");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Wrong password is rejected
    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": email, "password": "wrong password" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Right password works
    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": email, "password": "correct horse battery staple" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded catalog"]
async fn test_product_listing_and_search() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    assert!(!products.is_empty(), "seeded catalog should not be empty");

    // Search requires a query
    let resp = client
        .get(format!("{base_url}/products/search"))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{base_url}/products/search?q=apple"))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);

    // Unknown product is a 404
    let resp = client
        .get(format!("{base_url}/products/999999"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded catalog"]
async fn test_cart_requires_auth() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded catalog"]
async fn test_cart_lifecycle_and_empty_checkout() {
    let (client, _email) = registered_shopper().await;
    let base_url = storefront_base_url();

    // Fresh cart is empty
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["item_count"], 0);

    // Checkout of an empty cart is rejected
    let resp = client
        .post(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Pick a product that is in stock
    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    let in_stock = products
        .iter()
        .find(|p| p["out_of_stock"] == false)
        .expect("seeded catalog should have stocked products");
    let product_id = in_stock["id"].as_i64().expect("product id");

    // Add it twice; lines merge
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/cart/add"))
            .json(&json!({ "product_id": product_id, "quantity": 1 }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(1));

    // Setting quantity to zero removes the line
    let resp = client
        .post(format!("{base_url}/cart/update"))
        .json(&json!({ "product_id": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["item_count"], 0);

    // A fresh wallet is empty, so a real checkout must be refused
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_purchase_requests_and_tasks() {
    let (client, _email) = registered_shopper().await;
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/requests"))
        .json(&json!({ "product": "Dragonfruit", "quantity": 3 }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let request: Value = resp.json().await.expect("Failed to parse request");
    assert_eq!(request["status"], "pending");

    // Zero quantity is rejected
    let resp = client
        .post(format!("{base_url}/requests"))
        .json(&json!({ "product": "Dragonfruit", "quantity": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{base_url}/requests"))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::OK);
    let requests: Vec<Value> = resp.json().await.expect("Failed to parse requests");
    assert_eq!(requests.len(), 1);

    // Task submission
    let resp = client
        .post(format!("{base_url}/tasks"))
        .json(&json!({
            "description": "Restocked the shelves",
            "supervisors": ["Sam"],
        }))
        .send()
        .await
        .expect("Failed to submit task");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Empty description is rejected
    let resp = client
        .post(format!("{base_url}/tasks"))
        .json(&json!({ "description": "   ", "supervisors": ["Sam"] }))
        .send()
        .await
        .expect("Failed to submit task");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_transaction_history_bounds() {
    let (client, _email) = registered_shopper().await;
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/transactions"))
        .send()
        .await
        .expect("Failed to list transactions");
    assert_eq!(resp.status(), StatusCode::OK);

    // from after to is rejected
    let resp = client
        .get(format!(
            "{base_url}/transactions?from=2025-06-01T00:00:00Z&to=2025-01-01T00:00:00Z"
        ))
        .send()
        .await
        .expect("Failed to list transactions");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
