//! HTTP route handlers for the staff admin API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /auth/login             - Staff login
//! POST /auth/logout            - Staff logout
//!
//! # Catalog
//! GET    /products             - Catalog (?q=&sort=newest|price_asc|price_desc)
//! POST   /products             - Add a product
//! PUT    /products/{id}        - Edit name/price/image
//! POST   /products/{id}/stock  - Adjust stock by a signed delta
//! DELETE /products/{id}        - Remove a product
//!
//! # Shoppers
//! GET  /users                  - List shopper accounts (?q=)
//! POST /users/suspend          - Batch suspend or reinstate
//! POST /users/wallets/credit   - Batch credit wallets
//! POST /users/wallets/deduct   - Batch deduct (skips short balances)
//! POST /users/{id}/reset-password - Email a password reset link
//!
//! # Purchase requests
//! GET    /requests             - List with filters (?requester=&status=&from=&to=&oldest_first=)
//! POST   /requests/status      - Batch status update
//! DELETE /requests/{id}        - Delete a request
//!
//! # Tasks
//! GET  /tasks                  - Pending task queue
//! POST /tasks/{id}/approve     - Approve and credit the shopper
//! POST /tasks/{id}/reject      - Reject without credit
//!
//! # Auctions
//! GET  /auctions               - All auction items
//! POST /auctions               - Create an item
//! POST /auctions/{id}/settle   - Settle an expired item
//!
//! # Reporting
//! GET /transactions            - Transaction log (?from=&to=)
//! GET /reports/sales           - Sales dashboard report
//! GET /events                  - SSE change feed for open dashboards
//! ```

pub mod auctions;
pub mod auth;
pub mod events;
pub mod products;
pub mod reports;
pub mod requests;
pub mod tasks;
pub mod transactions;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create all routes for the admin service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::remove),
        )
        .route("/products/{id}/stock", post(products::adjust_stock))
        .route("/users", get(users::index))
        .route("/users/suspend", post(users::suspend))
        .route("/users/wallets/credit", post(users::credit_wallets))
        .route("/users/wallets/deduct", post(users::deduct_wallets))
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route("/requests", get(requests::index))
        .route("/requests/status", post(requests::set_status))
        .route("/requests/{id}", delete(requests::remove))
        .route("/tasks", get(tasks::index))
        .route("/tasks/{id}/approve", post(tasks::approve))
        .route("/tasks/{id}/reject", post(tasks::reject))
        .route("/auctions", get(auctions::index).post(auctions::create))
        .route("/auctions/{id}/settle", post(auctions::settle))
        .route("/transactions", get(transactions::index))
        .route("/reports/sales", get(reports::sales))
        .route("/events", get(events::stream))
}
