//! Business logic services.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod tasks;

pub use auth::{AuthError, AuthService};
pub use catalog::CatalogService;
pub use checkout::{CheckoutError, CheckoutService};
pub use tasks::{TaskSubmission, TaskValidationError};
