//! Task review.
//!
//! Approval deletes the task row and credits the shopper in one
//! transaction. The delete doubles as the idempotency guard: a second
//! approval of the same task finds no row and credits nothing.

use minimart_core::{Money, TaskLogId, UserId};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::TaskLog;

/// Repository for staff review of task submissions.
pub struct TaskAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all pending tasks, oldest first so the queue drains in order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_pending(&self) -> Result<Vec<TaskLog>, RepositoryError> {
        let tasks = sqlx::query_as::<_, TaskLog>(
            r"
            SELECT id, description, admin_supervised, user_name, user_id, created_at
            FROM task_logs
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    /// Approve a task and credit the submitting shopper's wallet.
    ///
    /// Returns the ID of the credited shopper.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the task was already
    /// resolved, or `RepositoryError::Database` if a query fails.
    pub async fn approve(
        &self,
        id: TaskLogId,
        reward: Money,
    ) -> Result<UserId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, UserId>(
            r"
            DELETE FROM task_logs
            WHERE id = $1
            RETURNING user_id
            ",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query(
            r"
            UPDATE users
            SET wallet = wallet + $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .bind(reward)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user_id)
    }

    /// Reject a task without crediting anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the task was already
    /// resolved, or `RepositoryError::Database` if the query fails.
    pub async fn reject(&self, id: TaskLogId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM task_logs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
