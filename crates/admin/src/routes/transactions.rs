//! Transaction log route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::db::TransactionAdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::TransactionRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Transaction log, newest first, optionally bounded by date.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TransactionRecord>>> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::BadRequest(
            "'from' must not be after 'to'".to_string(),
        ));
    }

    let records = TransactionAdminRepository::new(state.pool())
        .list(query.from, query.to)
        .await?;
    Ok(Json(records))
}
