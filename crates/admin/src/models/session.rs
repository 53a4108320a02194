//! Session-related types.

use serde::{Deserialize, Serialize};

use minimart_core::StaffId;

/// Session-stored staff identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStaff {
    /// Staff member's database ID.
    pub id: StaffId,
    /// Staff member's email address.
    pub email: String,
    /// Staff member's display name.
    pub name: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";
}
