//! Integration tests for Minimart.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! docker compose up -d postgres
//! cargo run -p minimart-cli -- migrate all
//! cargo run -p minimart-cli -- seed
//!
//! # Start both servers, then run
//! cargo test -p minimart-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need live servers.

use reqwest::Client;
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client with a cookie store, so session cookies persist across
/// requests within a test.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique shopper email so tests do not collide across runs.
#[must_use]
pub fn unique_email() -> String {
    format!("shopper-{}@example.com", Uuid::new_v4())
}

/// Register and log in a fresh shopper, returning the session client
/// and the shopper's email.
///
/// # Panics
///
/// Panics if registration fails.
pub async fn registered_shopper() -> (Client, String) {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&serde_json::json!({
            "name": "Test Shopper",
            "email": email,
            "password": "correct horse battery staple",
        }))
        .send()
        .await
        .expect("Failed to register shopper");
    assert!(
        resp.status().is_success(),
        "registration failed: {}",
        resp.status()
    );

    (client, email)
}
