//! Purchase history route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::Money;

use crate::db::TransactionRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::TransactionRecord;
use crate::routes::auth::load_active_user;
use crate::state::AppState;

/// Optional date-range filter.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// A past purchase.
#[derive(Debug, Serialize)]
pub struct TransactionView {
    pub transaction_uuid: uuid::Uuid,
    pub products: serde_json::Value,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

impl From<&TransactionRecord> for TransactionView {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            transaction_uuid: record.transaction_uuid,
            products: record.products.clone(),
            total: record.total,
            created_at: record.created_at,
        }
    }
}

/// The shopper's purchase history, newest first.
#[instrument(skip(state, session, auth))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TransactionView>>> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::BadRequest(
            "'from' must not be after 'to'".to_string(),
        ));
    }

    load_active_user(&state, &session, &auth).await?;

    let records = TransactionRepository::new(state.pool())
        .list_for_email(&auth.email, query.from, query.to)
        .await?;

    Ok(Json(records.iter().map(TransactionView::from).collect()))
}
