//! Catalog administration route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use minimart_core::Money;

use crate::db::{ProductAdminRepository, ProductSort};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::models::Product;
use crate::state::AppState;
use crate::watch::ChangeTopic;

/// New product body. Price is a decimal string.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub price: String,
    pub qty: i32,
    pub image_url: Option<String>,
}

/// Product edit body.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub name: String,
    pub price: String,
    pub image_url: Option<String>,
}

/// Stock adjustment body. Positive restocks, negative corrects.
#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub delta: i32,
}

fn parse_price(raw: &str) -> Result<Money> {
    Money::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid price: {e}")))
}

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(
            "product name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
}

/// Catalog as staff see it, searchable and sortable by price.
#[instrument(skip(state, _staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaffAuth(_staff): RequireStaffAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductAdminRepository::new(state.pool())
        .list(query.q.as_deref(), query.sort)
        .await?;
    Ok(Json(products))
}

/// Add a product to the catalog.
#[instrument(skip(state, staff, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Json(body): Json<CreateRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let name = validate_name(&body.name)?;
    let price = parse_price(&body.price)?;
    if body.qty < 0 {
        return Err(AppError::BadRequest(
            "stock quantity must not be negative".to_string(),
        ));
    }

    let product = ProductAdminRepository::new(state.pool())
        .create(name, price, body.qty, body.image_url.as_deref())
        .await?;

    tracing::info!(staff = %staff.name, product_id = %product.id, "product added");
    state
        .events()
        .publish(ChangeTopic::Products, format!("added {}", product.name));

    Ok((StatusCode::CREATED, Json(product)))
}

/// Edit a product's name, price, or image.
#[instrument(skip(state, staff, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<Product>> {
    let name = validate_name(&body.name)?;
    let price = parse_price(&body.price)?;

    let product = ProductAdminRepository::new(state.pool())
        .update(id.into(), name, price, body.image_url.as_deref())
        .await?;

    tracing::info!(staff = %staff.name, product_id = %product.id, "product updated");
    state
        .events()
        .publish(ChangeTopic::Products, format!("updated {}", product.name));

    Ok(Json(product))
}

/// Adjust stock by a signed delta.
#[instrument(skip(state, staff, body))]
pub async fn adjust_stock(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
    Json(body): Json<StockRequest>,
) -> Result<Json<Product>> {
    if body.delta == 0 {
        return Err(AppError::BadRequest(
            "stock delta must not be zero".to_string(),
        ));
    }

    let product = ProductAdminRepository::new(state.pool())
        .adjust_stock(id.into(), body.delta)
        .await?;

    tracing::info!(
        staff = %staff.name,
        product_id = %product.id,
        delta = body.delta,
        qty = product.qty,
        "stock adjusted"
    );
    state
        .events()
        .publish(ChangeTopic::Products, format!("restocked {}", product.name));

    Ok(Json(product))
}

/// Remove a product from the catalog.
#[instrument(skip(state, staff))]
pub async fn remove(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ProductAdminRepository::new(state.pool())
        .delete(id.into())
        .await?;

    tracing::info!(staff = %staff.name, product_id = id, "product removed");
    state
        .events()
        .publish(ChangeTopic::Products, format!("removed product {id}"));

    Ok(StatusCode::NO_CONTENT)
}
