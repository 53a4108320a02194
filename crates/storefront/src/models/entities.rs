//! Row types backing the storefront repositories.

use chrono::{DateTime, Utc};
use minimart_core::{
    AuctionItemId, Cart, Money, ProductId, RequestId, RequestStatus, TaskLogId, TransactionId,
    UserId,
};
use serde::Serialize;

/// A shopper account with a wallet balance and a persisted cart.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub wallet: Money,
    /// Raw cart column. Decode with [`User::cart`] so malformed lines are
    /// skipped rather than failing the whole row.
    pub cart: serde_json::Value,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Decode the stored cart, returning the cart and the number of lines
    /// that were skipped because they could not be interpreted.
    #[must_use]
    pub fn cart(&self) -> (Cart, usize) {
        match self.cart.as_array() {
            Some(lines) => Cart::from_stored(lines),
            None => (Cart::new(), 0),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub qty: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stock below this threshold is flagged for restocking.
    pub const LOW_STOCK_THRESHOLD: i32 = 5;

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.qty < Self::LOW_STOCK_THRESHOLD
    }

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.qty <= 0
    }
}

/// A shopper's request for a product the store does not stock.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseRequest {
    pub id: RequestId,
    pub requester_name: String,
    pub product: String,
    pub quantity: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A task submitted by a shopper for staff approval.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TaskLog {
    pub id: TaskLogId,
    pub description: String,
    pub admin_supervised: Vec<String>,
    pub user_name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// An item up for auction. `version` guards concurrent bids.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuctionItem {
    pub id: AuctionItemId,
    pub name: String,
    pub image_url: Option<String>,
    pub curr_bidder_email: Option<String>,
    pub curr_price: Money,
    pub version: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuctionItem {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// An append-only record of a completed checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub transaction_uuid: uuid::Uuid,
    pub email: String,
    pub products: serde_json::Value,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}
