//! Transaction record reads for reporting.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::TransactionRecord;

/// Repository for staff reads of the transaction log.
pub struct TransactionAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all transactions, newest first, optionally bounded to a date
    /// range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<TransactionRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r"
            SELECT id, transaction_uuid, email, products, total, created_at
            FROM transactions
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// List transactions since a given instant, oldest first. Used by the
    /// reporting service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r"
            SELECT id, transaction_uuid, email, products, total, created_at
            FROM transactions
            WHERE created_at >= $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }
}
