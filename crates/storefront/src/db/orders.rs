//! Checkout transaction.
//!
//! Placing an order is a single database transaction: debit the wallet,
//! decrement stock for every line, append the transaction record, and
//! clear the cart. Any failed step rolls the whole order back.

use minimart_core::{Cart, Email, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::TransactionRecord;

/// Repository for placing orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for the given cart.
    ///
    /// The wallet debit and every stock decrement are conditional updates,
    /// so concurrent checkouts can never drive a balance or a stock count
    /// negative.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the user does not exist
    /// - `RepositoryError::InsufficientFunds` if the wallet cannot cover the total
    /// - `RepositoryError::OutOfStock` if any line exceeds the available stock
    /// - `RepositoryError::Database` if a query fails
    pub async fn place(
        &self,
        user_id: UserId,
        email: &Email,
        cart: &Cart,
    ) -> Result<TransactionRecord, RepositoryError> {
        let total = cart.total();
        let mut tx = self.pool.begin().await?;

        let debited = sqlx::query(
            r"
            UPDATE users
            SET wallet = wallet - $2, updated_at = NOW()
            WHERE id = $1 AND wallet >= $2
            ",
        )
        .bind(user_id)
        .bind(total)
        .execute(&mut *tx)
        .await?;

        if debited.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
            return match exists {
                Some(_) => Err(RepositoryError::InsufficientFunds),
                None => Err(RepositoryError::NotFound),
            };
        }

        for line in cart.lines() {
            let quantity = i64::from(line.quantity);
            let decremented = sqlx::query(
                r"
                UPDATE products
                SET qty = qty - $2, updated_at = NOW()
                WHERE id = $1 AND qty >= $2
                ",
            )
            .bind(line.product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                // Dropping the transaction rolls back the debit and any
                // stock decrements applied so far.
                return Err(RepositoryError::OutOfStock(line.name.clone()));
            }
        }

        let record = sqlx::query_as::<_, TransactionRecord>(
            r"
            INSERT INTO transactions (transaction_uuid, email, products, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, transaction_uuid, email, products, total, created_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(cart.to_stored())
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            UPDATE users
            SET cart = '[]'::jsonb, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }
}
