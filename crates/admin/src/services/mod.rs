//! Business logic services for the admin side.

pub mod auth;
pub mod email;
pub mod reporting;

pub use auth::{StaffAuthError, StaffAuthService};
pub use email::{EmailError, EmailService};
