//! Domain models for the admin service.

pub mod entities;
pub mod session;

pub use entities::{
    AuctionItem, Product, PurchaseRequest, ShopperAccount, Staff, TaskLog, TransactionRecord,
};
pub use session::SessionStaff;
