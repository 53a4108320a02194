//! Auction administration route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use minimart_core::Money;
use uuid::Uuid;

use crate::db::{AuctionAdminRepository, Settlement};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::AuctionItem;
use crate::state::AppState;
use crate::watch::ChangeTopic;

/// Bidding window applied when no expiry is given.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// New auction item body. Starting price is a decimal string; the
/// bidding window defaults to one week.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub starting_price: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub item_name: String,
    pub winner: Option<WinnerResponse>,
}

#[derive(Debug, Serialize)]
pub struct WinnerResponse {
    pub email: String,
    pub price: Money,
    pub transaction_uuid: Uuid,
}

impl From<Settlement> for SettlementResponse {
    fn from(settlement: Settlement) -> Self {
        Self {
            item_name: settlement.item_name,
            winner: settlement.winner.map(|sale| WinnerResponse {
                email: sale.email,
                price: sale.price,
                transaction_uuid: sale.transaction_uuid,
            }),
        }
    }
}

/// All auction items, live and expired.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
) -> Result<Json<Vec<AuctionItem>>> {
    let items = AuctionAdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// Put an item up for auction.
#[instrument(skip(state, staff, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<CreateRequest>,
) -> Result<(StatusCode, Json<AuctionItem>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "item name must not be empty".to_string(),
        ));
    }
    let starting_price = Money::parse(&body.starting_price)
        .map_err(|e| AppError::BadRequest(format!("invalid starting price: {e}")))?;
    let expires_at = body
        .expires_at
        .unwrap_or_else(|| Utc::now() + chrono::Duration::days(DEFAULT_WINDOW_DAYS));
    if expires_at <= Utc::now() {
        return Err(AppError::BadRequest(
            "expiry must be in the future".to_string(),
        ));
    }

    let item = AuctionAdminRepository::new(state.pool())
        .create(name, starting_price, expires_at, body.image_url.as_deref())
        .await?;

    tracing::info!(staff = %staff.name, auction_id = %item.id, "auction item created");
    state
        .events()
        .publish(ChangeTopic::Auctions, format!("listed {}", item.name));

    Ok((StatusCode::CREATED, Json(item)))
}

/// Settle an expired auction.
#[instrument(skip(state, staff))]
pub async fn settle(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<Json<SettlementResponse>> {
    let settlement = AuctionAdminRepository::new(state.pool())
        .settle(id.into())
        .await?;

    tracing::info!(
        staff = %staff.name,
        auction_id = id,
        winner = settlement.winner.as_ref().map(|sale| sale.email.as_str()),
        "auction settled"
    );
    state.events().publish(
        ChangeTopic::Auctions,
        format!("settled {}", settlement.item_name),
    );

    Ok(Json(settlement.into()))
}
