//! Transaction record repository.
//!
//! Records are append-only. Inserts happen inside the checkout
//! transaction in [`crate::db::orders`]; this repository only reads.

use chrono::{DateTime, Utc};
use minimart_core::Email;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::TransactionRecord;

/// Repository for completed checkout records.
pub struct TransactionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a shopper's transactions, newest first, optionally bounded to a
    /// date range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_email(
        &self,
        email: &Email,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<TransactionRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r"
            SELECT id, transaction_uuid, email, products, total, created_at
            FROM transactions
            WHERE email = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(email.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }
}
