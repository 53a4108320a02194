//! Purchase request administration route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use minimart_core::{RequestId, RequestStatus};

use crate::db::{RequestAdminRepository, RequestFilter, StatusUpdateOutcome};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::PurchaseRequest;
use crate::state::AppState;
use crate::watch::ChangeTopic;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub requester: Option<String>,
    pub status: Option<RequestStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub oldest_first: bool,
}

/// Batch status change body.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub request_ids: Vec<i32>,
    pub status: RequestStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub updated: Vec<RequestId>,
    pub missing: Vec<RequestId>,
}

impl From<StatusUpdateOutcome> for StatusResponse {
    fn from(outcome: StatusUpdateOutcome) -> Self {
        Self {
            updated: outcome.updated,
            missing: outcome.missing,
        }
    }
}

/// List purchase requests, filtered by requester, status, or date range.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PurchaseRequest>>> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::BadRequest(
            "'from' must not be after 'to'".to_string(),
        ));
    }

    let filter = RequestFilter {
        requester: query.requester,
        status: query.status,
        from: query.from,
        to: query.to,
        oldest_first: query.oldest_first,
    };
    let requests = RequestAdminRepository::new(state.pool())
        .list(&filter)
        .await?;
    Ok(Json(requests))
}

/// Change the status of a batch of requests.
#[instrument(skip(state, staff, body))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<StatusRequest>,
) -> Result<Json<StatusResponse>> {
    if body.request_ids.is_empty() {
        return Err(AppError::BadRequest(
            "at least one request id is required".to_string(),
        ));
    }
    let ids: Vec<RequestId> = body.request_ids.iter().copied().map(RequestId::from).collect();

    let outcome = RequestAdminRepository::new(state.pool())
        .set_status(&ids, body.status)
        .await?;

    tracing::info!(
        staff = %staff.name,
        status = %body.status,
        updated = outcome.updated.len(),
        missing = outcome.missing.len(),
        "request statuses changed"
    );
    state.events().publish(
        ChangeTopic::Requests,
        format!("{} requests marked {}", outcome.updated.len(), body.status),
    );

    Ok(Json(outcome.into()))
}

/// Delete a purchase request.
#[instrument(skip(state, staff))]
pub async fn remove(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    RequestAdminRepository::new(state.pool())
        .delete(id.into())
        .await?;

    tracing::info!(staff = %staff.name, request_id = id, "request deleted");
    state
        .events()
        .publish(ChangeTopic::Requests, format!("deleted request {id}"));

    Ok(StatusCode::NO_CONTENT)
}
