//! Purchase request repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::PurchaseRequest;

/// Repository for shopper purchase requests.
pub struct RequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RequestRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a request for a product the store does not stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        requester_name: &str,
        product: &str,
        quantity: i32,
    ) -> Result<PurchaseRequest, RepositoryError> {
        let request = sqlx::query_as::<_, PurchaseRequest>(
            r"
            INSERT INTO requests (requester_name, product, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, requester_name, product, quantity, status, created_at
            ",
        )
        .bind(requester_name)
        .bind(product)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(request)
    }

    /// List requests submitted under a given name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_requester(
        &self,
        requester_name: &str,
    ) -> Result<Vec<PurchaseRequest>, RepositoryError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            r"
            SELECT id, requester_name, product, quantity, status, created_at
            FROM requests
            WHERE requester_name = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(requester_name)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }
}
