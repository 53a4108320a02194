//! Authentication route handlers.
//!
//! Handles shopper registration, login, and logout. A login stores the
//! shopper's identity in the server-side session.

use axum::{Json, extract::State, http::StatusCode};
use minimart_core::{Email, Money};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{RequireAuth, clear_current_user, set_current_user};
use crate::models::SessionUser;
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated shopper profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub wallet: Money,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a shopper account and log them in.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&body.name, &body.email, &body.password)
        .await?;

    let email = Email::parse(&user.email)
        .map_err(|e| AppError::Internal(format!("stored email invalid: {e}")))?;
    let session_user = SessionUser {
        id: user.id,
        email,
        name: user.name.clone(),
    };
    set_current_user(&session, &session_user)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&user.id, Some(&user.email));

    tracing::info!(user_id = %user.id, "shopper registered");

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            id: user.id.as_i32(),
            name: user.name,
            email: user.email,
            wallet: user.wallet,
        }),
    ))
}

/// Login with email and password.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ProfileResponse>> {
    let auth = AuthService::new(state.pool());
    let user = match auth.login(&body.email, &body.password).await {
        Ok(user) => user,
        Err(err) => {
            // A suspended account also loses any existing session
            if matches!(err, crate::services::AuthError::Suspended) {
                let _ = session.flush().await;
            }
            return Err(err.into());
        }
    };

    let email = Email::parse(&user.email)
        .map_err(|e| AppError::Internal(format!("stored email invalid: {e}")))?;
    let session_user = SessionUser {
        id: user.id,
        email,
        name: user.name.clone(),
    };
    set_current_user(&session, &session_user)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&user.id, Some(&user.email));

    Ok(Json(ProfileResponse {
        id: user.id.as_i32(),
        name: user.name,
        email: user.email,
        wallet: user.wallet,
    }))
}

/// Reset-password request body. The token arrives via the emailed link.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: uuid::Uuid,
    pub password: String,
}

/// Complete a staff-issued password reset: consume the token and
/// replace the account's password hash.
#[instrument(skip(state, body))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode> {
    let auth = AuthService::new(state.pool());
    auth.reset_password(body.token, &body.password).await?;

    tracing::info!("password reset completed");
    Ok(StatusCode::NO_CONTENT)
}

/// Logout and clear the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// Load the logged-in shopper's row, rejecting suspended or deleted
/// accounts. Suspension also drops the session.
pub(crate) async fn load_active_user(
    state: &AppState,
    session: &Session,
    auth: &SessionUser,
) -> Result<crate::models::User> {
    let users = UserRepository::new(state.pool());
    let user = users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_string()))?;

    if user.is_suspended {
        let _ = session.flush().await;
        return Err(AppError::Auth(crate::services::AuthError::Suspended));
    }

    Ok(user)
}

/// Current shopper profile and wallet balance.
#[instrument(skip(state, session, auth))]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<ProfileResponse>> {
    let user = load_active_user(&state, &session, &auth).await?;

    Ok(Json(ProfileResponse {
        id: user.id.as_i32(),
        name: user.name,
        email: user.email,
        wallet: user.wallet,
    }))
}
