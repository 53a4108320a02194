//! Sales reporting route handlers.

use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use tracing::instrument;

use crate::db::TransactionAdminRepository;
use crate::error::Result;
use crate::middleware::RequireStaffAuth;
use crate::services::reporting::{self, SalesReport};
use crate::state::AppState;

/// Sales dashboard report over the last year of transactions.
#[instrument(skip(state, _staff))]
pub async fn sales(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
) -> Result<Json<SalesReport>> {
    let now = Utc::now();
    let records = TransactionAdminRepository::new(state.pool())
        .list_since(now - Duration::days(365))
        .await?;

    Ok(Json(reporting::compute_report(&records, now)))
}
