//! Staff account repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Staff;

/// Repository for staff accounts.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a staff member by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM staff
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(staff)
    }

    /// Create a staff account. Used by the CLI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken,
    /// or `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Staff, RepositoryError> {
        let result = sqlx::query_as::<_, Staff>(
            r"
            INSERT INTO staff (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(staff) => Ok(staff),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                RepositoryError::Conflict("email already registered".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
