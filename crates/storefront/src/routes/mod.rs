//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /auth/register          - Create a shopper account
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//! POST /auth/reset-password    - Complete an emailed password reset
//! GET  /auth/me                - Current shopper profile and wallet
//!
//! # Products
//! GET  /products               - Product listing (cached)
//! GET  /products/search        - Search by name fragment (?q=)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart contents and total
//! POST /cart/add               - Add a product to the cart
//! POST /cart/update            - Set a line's quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! POST /checkout               - Place the order
//!
//! # Purchase requests (requires auth)
//! GET  /requests               - List the shopper's requests
//! POST /requests               - Request an unstocked product
//!
//! # Tasks (requires auth)
//! GET  /tasks                  - List pending task submissions
//! POST /tasks                  - Submit a completed task
//!
//! # Auctions
//! GET  /auctions               - List open auction items
//! POST /auctions/{id}/bid      - Place a bid (requires auth)
//!
//! # Transactions (requires auth)
//! GET  /transactions           - Purchase history (?from=&to=)
//! ```

pub mod auctions;
pub mod auth;
pub mod cart;
pub mod products;
pub mod requests;
pub mod tasks;
pub mod transactions;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/reset-password", post(auth::reset_password))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the auction routes router.
pub fn auction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auctions::index))
        .route("/{id}/bid", post(auctions::bid))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/requests", get(requests::index).post(requests::create))
        .route("/tasks", get(tasks::index).post(tasks::create))
        .nest("/auctions", auction_routes())
        .route("/transactions", get(transactions::index))
}
