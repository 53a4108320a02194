//! Auction route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::Money;

use crate::db::AuctionRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::AuctionItem;
use crate::routes::auth::load_active_user;
use crate::state::AppState;

/// Bid request body. `version` is the item version the bidder last saw;
/// a stale version means someone else bid in the meantime.
#[derive(Debug, Deserialize)]
pub struct BidRequest {
    pub amount: String,
    pub version: i32,
}

/// An auction item as shown to shoppers.
#[derive(Debug, Serialize)]
pub struct AuctionView {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub curr_price: Money,
    pub curr_bidder_email: Option<String>,
    pub version: i32,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the bidding window closes, floored at zero. Derived
    /// at response time, never stored.
    pub seconds_remaining: i64,
}

impl From<&AuctionItem> for AuctionView {
    fn from(item: &AuctionItem) -> Self {
        let seconds_remaining = (item.expires_at - Utc::now()).num_seconds().max(0);
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            curr_price: item.curr_price,
            curr_bidder_email: item.curr_bidder_email.clone(),
            version: item.version,
            expires_at: item.expires_at,
            seconds_remaining,
        }
    }
}

/// List open auction items.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<AuctionView>>> {
    let items = AuctionRepository::new(state.pool()).list_open().await?;
    Ok(Json(items.iter().map(AuctionView::from).collect()))
}

/// Place a bid. The amount is held from the bidder's wallet until they
/// are outbid or the auction settles.
#[instrument(skip(state, session, auth, body))]
pub async fn bid(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<i32>,
    Json(body): Json<BidRequest>,
) -> Result<Json<AuctionView>> {
    let amount = Money::parse(&body.amount)
        .map_err(|e| AppError::BadRequest(format!("invalid bid amount: {e}")))?;

    let user = load_active_user(&state, &session, &auth).await?;

    let item = AuctionRepository::new(state.pool())
        .place_bid(id.into(), &auth.email, amount, body.version)
        .await?;

    tracing::info!(
        user_id = %user.id,
        item_id = %item.id,
        amount = %amount,
        "bid accepted"
    );

    Ok(Json(AuctionView::from(&item)))
}
