//! Shopper account administration.

use chrono::{DateTime, Utc};
use minimart_core::{Money, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::ShopperAccount;

/// Outcome of a batched wallet update.
///
/// Credits apply to every matched account. Deductions skip accounts whose
/// balance cannot cover the amount, and the skipped IDs are reported so
/// staff see exactly which accounts were left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWalletOutcome {
    pub updated: Vec<UserId>,
    pub skipped: Vec<UserId>,
}

/// Repository for staff operations on shopper accounts.
pub struct UserAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List shopper accounts, newest first, optionally narrowed by a
    /// case-insensitive name or email fragment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<ShopperAccount>, RepositoryError> {
        let pattern = search
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let accounts = sqlx::query_as::<_, ShopperAccount>(
            r"
            SELECT id, name, email, wallet, is_suspended, created_at
            FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    /// Find a shopper account by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<ShopperAccount>, RepositoryError> {
        let account = sqlx::query_as::<_, ShopperAccount>(
            r"
            SELECT id, name, email, wallet, is_suspended, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Suspend or reinstate every listed account.
    ///
    /// Returns the IDs that were actually updated; callers can diff
    /// against the request to report accounts that no longer exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_suspended(
        &self,
        ids: &[UserId],
        suspended: bool,
    ) -> Result<Vec<UserId>, RepositoryError> {
        let updated = sqlx::query_scalar::<_, UserId>(
            r"
            UPDATE users
            SET is_suspended = $2, updated_at = NOW()
            WHERE id = ANY($1)
            RETURNING id
            ",
        )
        .bind(ids)
        .bind(suspended)
        .fetch_all(self.pool)
        .await?;

        Ok(updated)
    }

    /// Credit every listed account by the same amount.
    ///
    /// The delta is applied in a single statement, so a concurrent checkout
    /// cannot be lost between a read and a write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn credit_wallets(
        &self,
        ids: &[UserId],
        amount: Money,
    ) -> Result<BatchWalletOutcome, RepositoryError> {
        let updated = sqlx::query_scalar::<_, UserId>(
            r"
            UPDATE users
            SET wallet = wallet + $2, updated_at = NOW()
            WHERE id = ANY($1)
            RETURNING id
            ",
        )
        .bind(ids)
        .bind(amount)
        .fetch_all(self.pool)
        .await?;

        Ok(outcome(ids, updated))
    }

    /// Deduct the same amount from every listed account that can cover it.
    ///
    /// Accounts whose balance is below the amount are skipped rather than
    /// driven negative; their IDs come back in `skipped`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn deduct_wallets(
        &self,
        ids: &[UserId],
        amount: Money,
    ) -> Result<BatchWalletOutcome, RepositoryError> {
        let updated = sqlx::query_scalar::<_, UserId>(
            r"
            UPDATE users
            SET wallet = wallet - $2, updated_at = NOW()
            WHERE id = ANY($1) AND wallet >= $2
            RETURNING id
            ",
        )
        .bind(ids)
        .bind(amount)
        .fetch_all(self.pool)
        .await?;

        Ok(outcome(ids, updated))
    }

    /// Store a password reset token for a shopper.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account does not exist,
    /// or `RepositoryError::Database` for other failures.
    pub async fn create_reset_token(
        &self,
        user_id: UserId,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO password_reset_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(RepositoryError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn outcome(requested: &[UserId], updated: Vec<UserId>) -> BatchWalletOutcome {
    let skipped = requested
        .iter()
        .filter(|id| !updated.contains(id))
        .copied()
        .collect();
    BatchWalletOutcome { updated, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_partitions_skipped_ids() {
        let requested = [UserId::new(1), UserId::new(2), UserId::new(3)];
        let updated = vec![UserId::new(1), UserId::new(3)];

        let result = outcome(&requested, updated);
        assert_eq!(result.updated, vec![UserId::new(1), UserId::new(3)]);
        assert_eq!(result.skipped, vec![UserId::new(2)]);
    }

    #[test]
    fn test_outcome_all_updated() {
        let requested = [UserId::new(5)];
        let result = outcome(&requested, vec![UserId::new(5)]);
        assert!(result.skipped.is_empty());
    }
}
