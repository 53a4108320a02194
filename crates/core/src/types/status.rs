//! Status enums for persisted entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fulfillment status of a product request.
///
/// Requests are created `Unfulfilled` and only ever move between the three
/// states through staff edits; they are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "request_status", rename_all = "lowercase")
)]
pub enum RequestStatus {
    #[default]
    Unfulfilled,
    Pending,
    Fulfilled,
}

impl RequestStatus {
    /// Stable lowercase name, matching both the wire format and the
    /// database enum label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unfulfilled => "unfulfilled",
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfulfilled() {
        assert_eq!(RequestStatus::default(), RequestStatus::Unfulfilled);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Pending).expect("serialize");
        assert_eq!(json, "\"pending\"");
        let back: RequestStatus = serde_json::from_str("\"fulfilled\"").expect("deserialize");
        assert_eq!(back, RequestStatus::Fulfilled);
    }
}
