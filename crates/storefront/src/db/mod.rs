//! Database access layer.
//!
//! Each repository wraps a `PgPool` reference and owns the SQL for one
//! aggregate. Multi-step flows that must be atomic (checkout, bidding)
//! run inside a single transaction within the owning repository.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod auctions;
pub mod orders;
pub mod products;
pub mod requests;
pub mod task_logs;
pub mod transactions;
pub mod users;

pub use auctions::AuctionRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use requests::RequestRepository;
pub use task_logs::TaskLogRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in database is invalid or corrupted
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// Record not found
    #[error("Record not found")]
    NotFound,

    /// Operation conflicts with current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Wallet balance cannot cover the requested amount
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Not enough stock to satisfy the requested quantity
    #[error("Out of stock: {0}")]
    OutOfStock(String),
}

/// Create a `PostgreSQL` connection pool from configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the pool cannot connect to the database.
pub async fn create_pool(config: &crate::config::StorefrontConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(config.database_url.expose_secret())
        .await
}
