//! Shopper account administration route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use minimart_core::{Money, UserId};

use crate::db::{BatchWalletOutcome, UserAdminRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::ShopperAccount;
use crate::state::AppState;
use crate::watch::ChangeTopic;

/// Reset links expire after this long.
const RESET_TOKEN_VALIDITY_HOURS: i64 = 24;

/// Batch suspension body. `suspended` applies to every listed account.
#[derive(Debug, Deserialize)]
pub struct SuspendRequest {
    pub user_ids: Vec<i32>,
    pub suspended: bool,
}

#[derive(Debug, Serialize)]
pub struct SuspendResponse {
    pub updated: Vec<UserId>,
    pub missing: Vec<UserId>,
}

/// Batch wallet operation body. Amount is a decimal string.
#[derive(Debug, Deserialize)]
pub struct WalletRequest {
    pub user_ids: Vec<i32>,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub updated: Vec<UserId>,
    pub skipped: Vec<UserId>,
}

impl From<BatchWalletOutcome> for WalletResponse {
    fn from(outcome: BatchWalletOutcome) -> Self {
        Self {
            updated: outcome.updated,
            skipped: outcome.skipped,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub email_sent: bool,
}

fn parse_amount(raw: &str) -> Result<Money> {
    let amount =
        Money::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid amount: {e}")))?;
    if amount == Money::ZERO {
        return Err(AppError::BadRequest("amount must not be zero".to_string()));
    }
    Ok(amount)
}

fn validate_batch(user_ids: &[i32]) -> Result<Vec<UserId>> {
    if user_ids.is_empty() {
        return Err(AppError::BadRequest(
            "at least one user id is required".to_string(),
        ));
    }
    Ok(user_ids.iter().copied().map(UserId::from).collect())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Shopper accounts, searchable by name or email.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ShopperAccount>>> {
    let users = UserAdminRepository::new(state.pool())
        .list(query.q.as_deref())
        .await?;
    Ok(Json(users))
}

/// Suspend or reinstate accounts in bulk. IDs that match no account come
/// back in `missing` rather than failing the whole batch.
#[instrument(skip(state, staff, body))]
pub async fn suspend(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<SuspendRequest>,
) -> Result<Json<SuspendResponse>> {
    let ids = validate_batch(&body.user_ids)?;

    let updated = UserAdminRepository::new(state.pool())
        .set_suspended(&ids, body.suspended)
        .await?;
    let missing = ids
        .iter()
        .filter(|id| !updated.contains(id))
        .copied()
        .collect();

    tracing::info!(
        staff = %staff.name,
        updated = updated.len(),
        suspended = body.suspended,
        "account suspension changed"
    );
    state.events().publish(
        ChangeTopic::Users,
        format!(
            "{} {} accounts",
            if body.suspended { "suspended" } else { "reinstated" },
            updated.len()
        ),
    );

    Ok(Json(SuspendResponse { updated, missing }))
}

/// Credit wallets in bulk. Every listed account is credited.
#[instrument(skip(state, staff, body))]
pub async fn credit_wallets(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<WalletRequest>,
) -> Result<Json<WalletResponse>> {
    let ids = validate_batch(&body.user_ids)?;
    let amount = parse_amount(&body.amount)?;

    let outcome = UserAdminRepository::new(state.pool())
        .credit_wallets(&ids, amount)
        .await?;

    tracing::info!(
        staff = %staff.name,
        credited = outcome.updated.len(),
        missing = outcome.skipped.len(),
        %amount,
        "wallets credited"
    );
    state.events().publish(
        ChangeTopic::Users,
        format!("credited {} wallets", outcome.updated.len()),
    );

    Ok(Json(outcome.into()))
}

/// Deduct from wallets in bulk. Accounts with insufficient balance are
/// skipped, never driven negative.
#[instrument(skip(state, staff, body))]
pub async fn deduct_wallets(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<WalletRequest>,
) -> Result<Json<WalletResponse>> {
    let ids = validate_batch(&body.user_ids)?;
    let amount = parse_amount(&body.amount)?;

    let outcome = UserAdminRepository::new(state.pool())
        .deduct_wallets(&ids, amount)
        .await?;

    tracing::info!(
        staff = %staff.name,
        deducted = outcome.updated.len(),
        skipped = outcome.skipped.len(),
        %amount,
        "wallets deducted"
    );
    state.events().publish(
        ChangeTopic::Users,
        format!("deducted from {} wallets", outcome.updated.len()),
    );

    Ok(Json(outcome.into()))
}

/// Issue a password reset token for a shopper and email them the link.
#[instrument(skip(state, staff))]
pub async fn reset_password(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ResetResponse>)> {
    let Some(email_service) = state.email() else {
        return Err(AppError::BadRequest(
            "outbound email is not configured".to_string(),
        ));
    };
    let Some(storefront_url) = state.config().storefront_url.as_deref() else {
        return Err(AppError::BadRequest(
            "storefront URL is not configured".to_string(),
        ));
    };

    let repo = UserAdminRepository::new(state.pool());
    let user = repo
        .find_by_id(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound("account not found".to_string()))?;

    let token = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_VALIDITY_HOURS);
    repo.create_reset_token(user.id, token, expires_at).await?;

    let reset_url = format!(
        "{}/reset-password?token={token}",
        storefront_url.trim_end_matches('/')
    );
    email_service
        .send_password_reset(&user.email, &user.name, &reset_url)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "password reset email failed");
            AppError::Email(e)
        })?;

    tracing::info!(staff = %staff.name, user_id = %user.id, "password reset issued");

    Ok((
        StatusCode::ACCEPTED,
        Json(ResetResponse { email_sent: true }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_rejects_zero() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("0.00").is_err());
    }

    #[test]
    fn parse_amount_rejects_negative_and_garbage() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn validate_batch_rejects_empty() {
        assert!(validate_batch(&[]).is_err());
        assert_eq!(
            validate_batch(&[1, 2]).map(|ids| ids.len()).ok(),
            Some(2)
        );
    }
}
