//! Domain models for the storefront.

pub mod entities;
pub mod session;

pub use entities::{AuctionItem, Product, PurchaseRequest, TaskLog, TransactionRecord, User};
pub use session::SessionUser;
