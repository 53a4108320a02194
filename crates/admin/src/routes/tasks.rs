//! Task approval route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use minimart_core::{Money, UserId};

use crate::db::TaskAdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::TaskLog;
use crate::state::AppState;
use crate::watch::ChangeTopic;

/// Approval body. Reward is a decimal string credited to the shopper.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub reward: String,
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub credited_user_id: UserId,
    pub reward: Money,
}

/// Pending task submissions, oldest first.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
) -> Result<Json<Vec<TaskLog>>> {
    let tasks = TaskAdminRepository::new(state.pool()).list_pending().await?;
    Ok(Json(tasks))
}

/// Approve a submission and credit its shopper's wallet.
#[instrument(skip(state, staff, body))]
pub async fn approve(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
    Json(body): Json<ApproveRequest>,
) -> Result<Json<ApproveResponse>> {
    let reward =
        Money::parse(&body.reward).map_err(|e| AppError::BadRequest(format!("invalid reward: {e}")))?;
    if reward == Money::ZERO {
        return Err(AppError::BadRequest("reward must not be zero".to_string()));
    }

    let credited_user_id = TaskAdminRepository::new(state.pool())
        .approve(id.into(), reward)
        .await?;

    tracing::info!(
        staff = %staff.name,
        task_id = id,
        user_id = %credited_user_id,
        %reward,
        "task approved"
    );
    state
        .events()
        .publish(ChangeTopic::Tasks, format!("approved task {id}"));

    Ok(Json(ApproveResponse {
        credited_user_id,
        reward,
    }))
}

/// Reject a submission without credit.
#[instrument(skip(state, staff))]
pub async fn reject(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    TaskAdminRepository::new(state.pool())
        .reject(id.into())
        .await?;

    tracing::info!(staff = %staff.name, task_id = id, "task rejected");
    state
        .events()
        .publish(ChangeTopic::Tasks, format!("rejected task {id}"));

    Ok(StatusCode::NO_CONTENT)
}
