//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use minimart_core::Money;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::services::CatalogService;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// A product as shown to shoppers.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: Money,
    pub qty: i32,
    pub image_url: Option<String>,
    pub low_stock: bool,
    pub out_of_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price,
            qty: product.qty,
            image_url: product.image_url.clone(),
            low_stock: product.is_low_stock(),
            out_of_stock: product.is_out_of_stock(),
        }
    }
}

/// Full catalog listing, served from the short-lived cache.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let catalog = CatalogService::new(state.pool(), state.catalog_cache());
    let products = catalog.list().await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}

/// Search the catalog by name fragment.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let trimmed = query.q.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(
            "search query must not be empty".to_string(),
        ));
    }

    let catalog = CatalogService::new(state.pool(), state.catalog_cache());
    let products = catalog.search(trimmed).await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}

/// Single product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductView>> {
    let products = ProductRepository::new(state.pool());
    let product = products
        .find_by_id(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from(&product)))
}
