//! Auction repository.
//!
//! A bid debits the bidder immediately as a hold and refunds the shopper
//! being outbid, all inside one transaction. The item row carries a
//! version counter so a bid placed against a stale view is rejected.

use chrono::{DateTime, Utc};
use minimart_core::{AuctionItemId, Email, Money};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::AuctionItem;

/// Why a bid was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidRejection {
    /// The auction has passed its expiry time.
    Expired,
    /// The offered amount does not exceed the current price.
    TooLow { current: Money },
    /// The bidder already holds the high bid.
    AlreadyHighBidder,
}

impl BidRejection {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Expired => "auction has ended".to_string(),
            Self::TooLow { current } => {
                format!("bid must exceed the current price of {current}")
            }
            Self::AlreadyHighBidder => "you already hold the high bid".to_string(),
        }
    }
}

/// Check a bid against the current item state. Pure; the caller holds the
/// row lock.
fn validate_bid(
    item: &AuctionItem,
    bidder: &Email,
    amount: Money,
    now: DateTime<Utc>,
) -> Result<(), BidRejection> {
    if item.is_expired(now) {
        return Err(BidRejection::Expired);
    }
    if item
        .curr_bidder_email
        .as_deref()
        .is_some_and(|current| current == bidder.as_str())
    {
        return Err(BidRejection::AlreadyHighBidder);
    }
    if amount <= item.curr_price {
        return Err(BidRejection::TooLow {
            current: item.curr_price,
        });
    }
    Ok(())
}

/// Repository for auction items.
pub struct AuctionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuctionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List open auction items, soonest to expire first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_open(&self) -> Result<Vec<AuctionItem>, RepositoryError> {
        let items = sqlx::query_as::<_, AuctionItem>(
            r"
            SELECT id, name, image_url, curr_bidder_email, curr_price,
                   version, expires_at, created_at
            FROM auction_items
            WHERE expires_at > NOW()
            ORDER BY expires_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Place a bid on an item.
    ///
    /// The bid amount is debited from the bidder's wallet as a hold, and
    /// the previous high bidder is refunded their hold in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the item does not exist
    /// - `RepositoryError::Conflict` if the item changed since the bidder
    ///   last saw it, or if the bid fails validation
    /// - `RepositoryError::InsufficientFunds` if the wallet cannot cover the bid
    /// - `RepositoryError::Database` if a query fails
    pub async fn place_bid(
        &self,
        item_id: AuctionItemId,
        bidder: &Email,
        amount: Money,
        expected_version: i32,
    ) -> Result<AuctionItem, RepositoryError> {
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
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if item.version != expected_version {
            return Err(RepositoryError::Conflict(
                "item was outbid since you loaded it".to_string(),
            ));
        }

        validate_bid(&item, bidder, amount, Utc::now())
            .map_err(|rejection| RepositoryError::Conflict(rejection.message()))?;

        let debited = sqlx::query(
            r"
            UPDATE users
            SET wallet = wallet - $2, updated_at = NOW()
            WHERE email = $1 AND wallet >= $2
            ",
        )
        .bind(bidder.as_str())
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        if debited.rows_affected() == 0 {
            return Err(RepositoryError::InsufficientFunds);
        }

        if let Some(previous) = &item.curr_bidder_email {
            sqlx::query(
                r"
                UPDATE users
                SET wallet = wallet + $2, updated_at = NOW()
                WHERE email = $1
                ",
            )
            .bind(previous)
            .bind(item.curr_price)
            .execute(&mut *tx)
            .await?;
        }

        let updated = sqlx::query_as::<_, AuctionItem>(
            r"
            UPDATE auction_items
            SET curr_bidder_email = $2, curr_price = $3, version = version + 1
            WHERE id = $1
            RETURNING id, name, image_url, curr_bidder_email, curr_price,
                      version, expires_at, created_at
            ",
        )
        .bind(item_id)
        .bind(bidder.as_str())
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn open_item(curr_price: &str, bidder: Option<&str>) -> AuctionItem {
        let now = Utc::now();
        AuctionItem {
            id: AuctionItemId::new(1),
            name: "Vintage clock".to_string(),
            image_url: None,
            curr_bidder_email: bidder.map(str::to_string),
            curr_price: Money::parse(curr_price).unwrap(),
            version: 0,
            expires_at: now + Duration::hours(1),
            created_at: now,
        }
    }

    #[test]
    fn test_validate_bid_accepts_higher_bid() {
        let item = open_item("10.00", Some("alice@example.com"));
        let bidder = Email::parse("bob@example.com").unwrap();
        let result = validate_bid(&item, &bidder, Money::parse("12.50").unwrap(), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_bid_rejects_expired() {
        let mut item = open_item("10.00", None);
        item.expires_at = Utc::now() - Duration::minutes(1);
        let bidder = Email::parse("bob@example.com").unwrap();
        let result = validate_bid(&item, &bidder, Money::parse("20.00").unwrap(), Utc::now());
        assert_eq!(result.unwrap_err(), BidRejection::Expired);
    }

    #[test]
    fn test_validate_bid_rejects_equal_amount() {
        let item = open_item("10.00", Some("alice@example.com"));
        let bidder = Email::parse("bob@example.com").unwrap();
        let result = validate_bid(&item, &bidder, Money::parse("10.00").unwrap(), Utc::now());
        assert!(matches!(result.unwrap_err(), BidRejection::TooLow { .. }));
    }

    #[test]
    fn test_validate_bid_rejects_current_high_bidder() {
        let item = open_item("10.00", Some("alice@example.com"));
        let bidder = Email::parse("alice@example.com").unwrap();
        let result = validate_bid(&item, &bidder, Money::parse("15.00").unwrap(), Utc::now());
        assert_eq!(result.unwrap_err(), BidRejection::AlreadyHighBidder);
    }

    #[test]
    fn test_validate_bid_no_previous_bidder_must_beat_start_price() {
        let item = open_item("5.00", None);
        let bidder = Email::parse("bob@example.com").unwrap();
        let too_low = validate_bid(&item, &bidder, Money::parse("5.00").unwrap(), Utc::now());
        assert!(too_low.is_err());
        let ok = validate_bid(&item, &bidder, Money::parse("5.01").unwrap(), Utc::now());
        assert!(ok.is_ok());
    }
}
