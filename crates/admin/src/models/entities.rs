//! Row types backing the admin repositories.
//!
//! The admin service reads the same tables the storefront writes, plus
//! the staff table that only exists on this side.

use chrono::{DateTime, Utc};
use minimart_core::{
    AuctionItemId, Money, ProductId, RequestId, RequestStatus, StaffId, TaskLogId, TransactionId,
    UserId,
};
use serde::Serialize;

/// A staff account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shopper account as staff see it. The password hash stays out of
/// this projection.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ShopperAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub wallet: Money,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
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

/// A shopper's purchase request.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseRequest {
    pub id: RequestId,
    pub requester_name: String,
    pub product: String,
    pub quantity: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A task awaiting staff review.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TaskLog {
    pub id: TaskLogId,
    pub description: String,
    pub admin_supervised: Vec<String>,
    pub user_name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// An auction item.
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

/// A completed checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub transaction_uuid: uuid::Uuid,
    pub email: String,
    pub products: serde_json::Value,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}
