//! Staff authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::{clear_current_staff, set_current_staff};
use crate::models::SessionStaff;
use crate::services::StaffAuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Logged-in staff profile.
#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Staff login.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<StaffResponse>> {
    let auth = StaffAuthService::new(state.pool());
    let staff = auth.login(&body.email, &body.password).await?;

    let session_staff = SessionStaff {
        id: staff.id,
        email: staff.email.clone(),
        name: staff.name.clone(),
    };
    set_current_staff(&session, &session_staff)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(staff_id = %staff.id, "staff logged in");

    Ok(Json(StaffResponse {
        id: staff.id.as_i32(),
        name: staff.name,
        email: staff.email,
    }))
}

/// Staff logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_staff(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}
