//! Task log repository.
//!
//! Shoppers submit completed tasks here; staff review and approve them
//! through the admin service, which credits the shopper's wallet.

use minimart_core::UserId;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::TaskLog;

/// Repository for shopper task submissions.
pub struct TaskLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskLogRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a completed task for staff approval.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        description: &str,
        admin_supervised: &[String],
        user_id: UserId,
        user_name: &str,
    ) -> Result<TaskLog, RepositoryError> {
        let task = sqlx::query_as::<_, TaskLog>(
            r"
            INSERT INTO task_logs (description, admin_supervised, user_id, user_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, description, admin_supervised, user_name, user_id, created_at
            ",
        )
        .bind(description)
        .bind(admin_supervised)
        .bind(user_id)
        .bind(user_name)
        .fetch_one(self.pool)
        .await?;

        Ok(task)
    }

    /// List a shopper's pending task submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<TaskLog>, RepositoryError> {
        let tasks = sqlx::query_as::<_, TaskLog>(
            r"
            SELECT id, description, admin_supervised, user_name, user_id, created_at
            FROM task_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }
}
