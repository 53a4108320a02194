//! Purchase request administration.

use chrono::{DateTime, Utc};
use minimart_core::{RequestId, RequestStatus};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::PurchaseRequest;

/// Filter for listing purchase requests.
#[derive(Debug, Default, Clone)]
pub struct RequestFilter {
    /// Case-insensitive requester name fragment.
    pub requester: Option<String>,
    pub status: Option<RequestStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Sort by submission date ascending instead of the default
    /// newest-first.
    pub oldest_first: bool,
}

/// Per-request outcome of a batched status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateOutcome {
    pub updated: Vec<RequestId>,
    pub missing: Vec<RequestId>,
}

/// Repository for staff operations on purchase requests.
pub struct RequestAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RequestAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List purchase requests matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<PurchaseRequest>, RepositoryError> {
        let requester_pattern = filter
            .requester
            .as_ref()
            .map(|name| format!("%{}%", name.replace('%', "\\%").replace('_', "\\_")));

        let order = if filter.oldest_first {
            "created_at ASC, id ASC"
        } else {
            "created_at DESC, id DESC"
        };
        let sql = format!(
            r"
            SELECT id, requester_name, product, quantity, status, created_at
            FROM requests
            WHERE ($1::text IS NULL OR requester_name ILIKE $1)
              AND ($2::request_status IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at <= $4)
            ORDER BY {order}
            "
        );
        let requests = sqlx::query_as::<_, PurchaseRequest>(&sql)
        .bind(requester_pattern)
        .bind(filter.status)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }

    /// Set the status of a batch of requests.
    ///
    /// Missing IDs do not fail the batch; they come back in `missing` so
    /// staff see which rows were gone (for example already deleted by a
    /// colleague).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        ids: &[RequestId],
        status: RequestStatus,
    ) -> Result<StatusUpdateOutcome, RepositoryError> {
        let updated = sqlx::query_scalar::<_, RequestId>(
            r"
            UPDATE requests
            SET status = $2
            WHERE id = ANY($1)
            RETURNING id
            ",
        )
        .bind(ids)
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        let missing = ids
            .iter()
            .filter(|id| !updated.contains(id))
            .copied()
            .collect();

        Ok(StatusUpdateOutcome { updated, missing })
    }

    /// Delete a request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist,
    /// or `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: RequestId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
