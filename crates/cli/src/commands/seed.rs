//! Catalog seeding for local development.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use minimart_core::Money;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A seed price failed to parse.
    #[error("Invalid seed price: {0}")]
    InvalidPrice(String),
}

/// Demo catalog. Pen is deliberately out of stock so the storefront's
/// sold-out path is exercised.
const DEMO_PRODUCTS: &[(&str, &str, i32)] = &[
    ("Apple", "2.50", 10),
    ("Banana", "1.50", 3),
    ("Toothpaste", "3.00", 8),
    ("Notebook", "5.00", 12),
    ("Pen", "1.00", 0),
    ("Milk", "1.80", 4),
    ("Chips", "2.00", 7),
];

/// Seed the catalog with demo products.
///
/// Skips products whose names already exist, so re-running is safe.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert
/// fails.
pub async fn products() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let mut inserted = 0_u32;
    for &(name, price, qty) in DEMO_PRODUCTS {
        let price =
            Money::parse(price).map_err(|e| SeedError::InvalidPrice(format!("{name}: {e}")))?;

        let result = sqlx::query(
            r"
            INSERT INTO products (name, price, qty)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(price)
        .bind(qty)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
            tracing::info!("  seeded {name} ({price}, qty {qty})");
        } else {
            tracing::info!("  skipped {name} (already present)");
        }
    }

    tracing::info!("Seeding complete: {inserted} products inserted");
    Ok(())
}
