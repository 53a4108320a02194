//! Purchase request route handlers.
//!
//! Shoppers request products the store doesn't stock. Staff review and
//! progress them through the admin service.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::RequestStatus;

use crate::db::RequestRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::PurchaseRequest;
use crate::routes::auth::load_active_user;
use crate::state::AppState;

/// Maximum requested quantity per submission.
const MAX_REQUEST_QUANTITY: i32 = 1000;

/// New purchase request body.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub product: String,
    pub quantity: i32,
}

/// A purchase request as shown to the shopper.
#[derive(Debug, Serialize)]
pub struct RequestView {
    pub id: i32,
    pub product: String,
    pub quantity: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&PurchaseRequest> for RequestView {
    fn from(request: &PurchaseRequest) -> Self {
        Self {
            id: request.id.as_i32(),
            product: request.product.clone(),
            quantity: request.quantity,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// List the shopper's purchase requests.
#[instrument(skip(state, session, auth))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<Vec<RequestView>>> {
    let user = load_active_user(&state, &session, &auth).await?;

    let requests = RequestRepository::new(state.pool())
        .list_by_requester(&user.name)
        .await?;

    Ok(Json(requests.iter().map(RequestView::from).collect()))
}

/// Submit a purchase request for an unstocked product.
#[instrument(skip(state, session, auth, body))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Json(body): Json<CreateRequest>,
) -> Result<(StatusCode, Json<RequestView>)> {
    let product = body.product.trim();
    if product.is_empty() {
        return Err(AppError::BadRequest(
            "product name must not be empty".to_string(),
        ));
    }
    if body.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    if body.quantity > MAX_REQUEST_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_REQUEST_QUANTITY}"
        )));
    }

    let user = load_active_user(&state, &session, &auth).await?;

    let request = RequestRepository::new(state.pool())
        .create(&user.name, product, body.quantity)
        .await?;

    tracing::info!(request_id = %request.id, "purchase request submitted");

    Ok((StatusCode::CREATED, Json(RequestView::from(&request))))
}
