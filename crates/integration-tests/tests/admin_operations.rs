//! Integration tests for the staff admin API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p minimart-admin)
//! - A staff account created via:
//!   cargo run -p minimart-cli -- staff create \
//!     -e staff@example.com -n "Test Staff" -p "integration-test-pw"
//!
//! Run with: cargo test -p minimart-integration-tests -- --ignored

use minimart_integration_tests::{admin_base_url, client};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Log in as the pre-created test staff account.
async fn staff_client() -> Client {
    let client = client();
    let base_url = admin_base_url();

    let email =
        std::env::var("TEST_STAFF_EMAIL").unwrap_or_else(|_| "staff@example.com".to_string());
    let password =
        std::env::var("TEST_STAFF_PASSWORD").unwrap_or_else(|_| "integration-test-pw".to_string());

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in as staff");
    assert_eq!(
        resp.status(),
        StatusCode::OK,
        "staff login failed; create the account with mm-cli first"
    );

    client
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_staff_routes_require_auth() {
    let client = client();
    let base_url = admin_base_url();

    for path in ["/products", "/users", "/requests", "/tasks", "/auctions"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_product_lifecycle() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    // Create without an image; the image stays optional end to end
    let resp = client
        .post(format!("{base_url}/products"))
        .json(&json!({ "name": "Integration Widget", "price": "4.25", "qty": 6 }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to parse product");
    let id = product["id"].as_i64().expect("product id");
    assert!(product["image_url"].is_null());

    // Bad price is rejected
    let resp = client
        .post(format!("{base_url}/products"))
        .json(&json!({ "name": "Bad Widget", "price": "-1", "qty": 1 }))
        .send()
        .await
        .expect("Failed to send product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Restock, then try to draw stock below zero
    let resp = client
        .post(format!("{base_url}/products/{id}/stock"))
        .json(&json!({ "delta": 4 }))
        .send()
        .await
        .expect("Failed to adjust stock");
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["qty"], 10);

    let resp = client
        .post(format!("{base_url}/products/{id}/stock"))
        .json(&json!({ "delta": -100 }))
        .send()
        .await
        .expect("Failed to adjust stock");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Update and delete
    let resp = client
        .put(format!("{base_url}/products/{id}"))
        .json(&json!({ "name": "Integration Widget v2", "price": "5.00" }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .delete(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .delete(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product twice");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_wallet_batch_operations() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    // Zero amount is rejected
    let resp = client
        .post(format!("{base_url}/users/wallets/credit"))
        .json(&json!({ "user_ids": [1], "amount": "0" }))
        .send()
        .await
        .expect("Failed to send credit");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Empty batch is rejected
    let resp = client
        .post(format!("{base_url}/users/wallets/credit"))
        .json(&json!({ "user_ids": [], "amount": "5.00" }))
        .send()
        .await
        .expect("Failed to send credit");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown accounts are skipped, not an error
    let resp = client
        .post(format!("{base_url}/users/wallets/credit"))
        .json(&json!({ "user_ids": [999_999], "amount": "5.00" }))
        .send()
        .await
        .expect("Failed to send credit");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Failed to parse outcome");
    assert_eq!(outcome["updated"].as_array().map(Vec::len), Some(0));
    assert_eq!(outcome["skipped"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_batch_suspend() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    // Empty batch is rejected
    let resp = client
        .post(format!("{base_url}/users/suspend"))
        .json(&json!({ "user_ids": [], "suspended": true }))
        .send()
        .await
        .expect("Failed to send suspend");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown accounts are reported missing, not an error
    let resp = client
        .post(format!("{base_url}/users/suspend"))
        .json(&json!({ "user_ids": [999_999], "suspended": true }))
        .send()
        .await
        .expect("Failed to send suspend");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Failed to parse outcome");
    assert_eq!(outcome["updated"].as_array().map(Vec::len), Some(0));
    assert_eq!(outcome["missing"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_request_filters_and_status() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/requests?status=pending"))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::OK);

    // Inverted date range is rejected
    let resp = client
        .get(format!(
            "{base_url}/requests?from=2025-06-01T00:00:00Z&to=2025-01-01T00:00:00Z"
        ))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Missing IDs come back in `missing` rather than failing the batch
    let resp = client
        .post(format!("{base_url}/requests/status"))
        .json(&json!({ "request_ids": [999_999], "status": "approved" }))
        .send()
        .await
        .expect("Failed to update statuses");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Failed to parse outcome");
    assert_eq!(outcome["missing"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_auction_settlement_guards() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    // Expiry in the past is rejected at creation
    let resp = client
        .post(format!("{base_url}/auctions"))
        .json(&json!({
            "name": "Expired Lot",
            "starting_price": "1.00",
            "expires_at": "2020-01-01T00:00:00Z",
        }))
        .send()
        .await
        .expect("Failed to send auction");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // A live auction cannot be settled
    let resp = client
        .post(format!("{base_url}/auctions"))
        .json(&json!({
            "name": "Live Lot",
            "starting_price": "1.00",
            "expires_at": "2030-01-01T00:00:00Z",
        }))
        .send()
        .await
        .expect("Failed to create auction");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Value = resp.json().await.expect("Failed to parse auction item");
    let id = item["id"].as_i64().expect("auction id");

    let resp = client
        .post(format!("{base_url}/auctions/{id}/settle"))
        .send()
        .await
        .expect("Failed to settle auction");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_sales_report_shape() {
    let client = staff_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/reports/sales"))
        .send()
        .await
        .expect("Failed to get sales report");
    assert_eq!(resp.status(), StatusCode::OK);

    let report: Value = resp.json().await.expect("Failed to parse report");
    assert_eq!(report["daily"].as_array().map(Vec::len), Some(7));
    assert!(report["top_items"].as_array().map(Vec::len) <= Some(5));
}
