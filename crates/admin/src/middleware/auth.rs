//! Authentication middleware and extractors for the admin service.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::SessionStaff;
use crate::models::session::keys;

/// Extractor that requires staff authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireStaffAuth(staff): RequireStaffAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", staff.name)
/// }
/// ```
pub struct RequireStaffAuth(pub SessionStaff);

/// Rejection returned when staff authentication is missing.
pub struct StaffAuthRejection;

impl IntoResponse for StaffAuthRejection {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

impl<S> FromRequestParts<S> for RequireStaffAuth
where
    S: Send + Sync,
{
    type Rejection = StaffAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(StaffAuthRejection)?;

        let staff: SessionStaff = session
            .get(keys::CURRENT_STAFF)
            .await
            .ok()
            .flatten()
            .ok_or(StaffAuthRejection)?;

        Ok(Self(staff))
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &SessionStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<SessionStaff>(keys::CURRENT_STAFF).await?;
    Ok(())
}
