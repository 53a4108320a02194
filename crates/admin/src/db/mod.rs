//! Database access layer for the admin service.
//!
//! Shares the database with the storefront but owns the staff-facing
//! SQL, including batched wallet updates, task approval, and auction
//! settlement.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod auctions;
pub mod products;
pub mod requests;
pub mod staff;
pub mod task_logs;
pub mod transactions;
pub mod users;

pub use auctions::{AuctionAdminRepository, Settlement};
pub use products::{ProductAdminRepository, ProductSort};
pub use requests::{RequestAdminRepository, RequestFilter, StatusUpdateOutcome};
pub use staff::StaffRepository;
pub use task_logs::TaskAdminRepository;
pub use transactions::TransactionAdminRepository;
pub use users::{BatchWalletOutcome, UserAdminRepository};

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

    /// Wallet balance cannot cover the requested deduction
    #[error("Insufficient funds")]
    InsufficientFunds,
}

/// Create a `PostgreSQL` connection pool from configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the pool cannot connect to the database.
pub async fn create_pool(config: &crate::config::AdminConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(config.database_url.expose_secret())
        .await
}
