//! Shared type definitions.

pub mod cart;
pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use cart::{Cart, CartLine};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use status::RequestStatus;
