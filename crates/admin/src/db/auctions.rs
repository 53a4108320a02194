//! Auction administration.
//!
//! Staff create auction items and settle them after expiry. The winning
//! bid was already held from the winner's wallet when it was placed, so
//! settlement records the sale and deletes the item without touching any
//! balance.

use chrono::{DateTime, Utc};
use minimart_core::{AuctionItemId, Money};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::AuctionItem;

/// Result of settling an auction item.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub item_name: String,
    /// Winner and their transaction, if anyone bid.
    pub winner: Option<SettledSale>,
}

/// The recorded sale for a settled auction.
#[derive(Debug, Clone)]
pub struct SettledSale {
    pub email: String,
    pub price: Money,
    pub transaction_uuid: Uuid,
}

/// Repository for staff operations on auctions.
pub struct AuctionAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuctionAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every auction item, soonest to expire first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AuctionItem>, RepositoryError> {
        let items = sqlx::query_as::<_, AuctionItem>(
            r"
            SELECT id, name, image_url, curr_bidder_email, curr_price,
                   version, expires_at, created_at
            FROM auction_items
            ORDER BY expires_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Put an item up for auction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        starting_price: Money,
        expires_at: DateTime<Utc>,
        image_url: Option<&str>,
    ) -> Result<AuctionItem, RepositoryError> {
        let item = sqlx::query_as::<_, AuctionItem>(
            r"
            INSERT INTO auction_items (name, curr_price, expires_at, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, image_url, curr_bidder_email, curr_price,
                      version, expires_at, created_at
            ",
        )
        .bind(name)
        .bind(starting_price)
        .bind(expires_at)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Settle an expired auction.
    ///
    /// Records the sale for the winning bidder (whose hold already paid
    /// for it) and deletes the item. An item with no bids is just
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist,
    /// `RepositoryError::Conflict` if it has not expired yet, or
    /// `RepositoryError::Database` if a query fails.
    pub async fn settle(&self, id: AuctionItemId) -> Result<Settlement, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, AuctionItem>(
            r"
            SELECT id, name, image_url, curr_bidder_email, curr_price,
                   version, expires_at, created_at
            FROM auction_items
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if item.expires_at > Utc::now() {
            return Err(RepositoryError::Conflict(
                "auction has not expired yet".to_string(),
            ));
        }

        let winner = match &item.curr_bidder_email {
            Some(email) => {
                let transaction_uuid = Uuid::new_v4();
                let products = json!([{
                    "name": item.name,
                    "unit_price": item.curr_price,
                    "quantity": 1,
                    "auction": true,
                }]);

                sqlx::query(
                    r"
                    INSERT INTO transactions (transaction_uuid, email, products, total)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(transaction_uuid)
                .bind(email)
                .bind(products)
                .bind(item.curr_price)
                .execute(&mut *tx)
                .await?;

                Some(SettledSale {
                    email: email.clone(),
                    price: item.curr_price,
                    transaction_uuid,
                })
            }
            None => None,
        };

        sqlx::query("DELETE FROM auction_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Settlement {
            item_name: item.name,
            winner,
        })
    }
}
