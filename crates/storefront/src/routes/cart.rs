//! Cart and checkout route handlers.
//!
//! The cart is persisted on the user row, so every mutation writes
//! through to the database before responding.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::{Cart, CartLine, Money};

use crate::db::{ProductRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::User;
use crate::routes::auth::load_active_user;
use crate::services::CheckoutService;
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// Quantity update request body. A quantity of zero removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub product_id: i32,
}

/// A cart line as shown to the shopper.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Cart contents and total.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: Money,
    /// Stored lines that could not be interpreted and were dropped.
    pub dropped_lines: usize,
}

/// Completed checkout summary.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub transaction_uuid: uuid::Uuid,
    pub total: Money,
    pub wallet_remaining: Money,
}

fn cart_view(cart: &Cart, dropped_lines: usize) -> CartView {
    CartView {
        lines: cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product_id.as_i32(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect(),
        item_count: cart.item_count(),
        total: cart.total(),
        dropped_lines,
    }
}

/// Decode the stored cart, warning when lines had to be dropped.
fn decode_cart(user: &User) -> (Cart, usize) {
    let (cart, dropped) = user.cart();
    if dropped > 0 {
        tracing::warn!(
            user_id = %user.id,
            dropped,
            "dropped malformed cart lines"
        );
    }
    (cart, dropped)
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart contents.
#[instrument(skip(state, session, auth))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<CartView>> {
    let user = load_active_user(&state, &session, &auth).await?;
    let (cart, dropped) = decode_cart(&user);
    Ok(Json(cart_view(&cart, dropped)))
}

/// Add a product to the cart.
///
/// The line is priced at the product's current catalog price. Out-of-stock
/// products cannot be added.
#[instrument(skip(state, session, auth, body))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Json(body): Json<AddRequest>,
) -> Result<Json<CartView>> {
    if body.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let user = load_active_user(&state, &session, &auth).await?;

    let products = ProductRepository::new(state.pool());
    let product = products
        .find_by_id(body.product_id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    if product.is_out_of_stock() {
        return Err(AppError::Database(crate::db::RepositoryError::OutOfStock(
            product.name,
        )));
    }
    if i64::from(body.quantity) > i64::from(product.qty) {
        return Err(AppError::BadRequest(format!(
            "only {} of {} in stock",
            product.qty, product.name
        )));
    }

    let (mut cart, dropped) = decode_cart(&user);
    cart.merge(CartLine {
        product_id: product.id,
        name: product.name,
        unit_price: product.price,
        quantity: body.quantity,
    });

    UserRepository::new(state.pool())
        .save_cart(user.id, &cart)
        .await?;

    Ok(Json(cart_view(&cart, dropped)))
}

/// Set a cart line's quantity. Zero removes the line.
#[instrument(skip(state, session, auth, body))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<CartView>> {
    let user = load_active_user(&state, &session, &auth).await?;

    let (mut cart, dropped) = decode_cart(&user);
    if !cart.set_quantity(body.product_id.into(), body.quantity) {
        return Err(AppError::NotFound(format!(
            "product {} is not in the cart",
            body.product_id
        )));
    }

    UserRepository::new(state.pool())
        .save_cart(user.id, &cart)
        .await?;

    Ok(Json(cart_view(&cart, dropped)))
}

/// Remove a line from the cart.
#[instrument(skip(state, session, auth, body))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Json(body): Json<RemoveRequest>,
) -> Result<Json<CartView>> {
    let user = load_active_user(&state, &session, &auth).await?;

    let (mut cart, dropped) = decode_cart(&user);
    if !cart.remove(body.product_id.into()) {
        return Err(AppError::NotFound(format!(
            "product {} is not in the cart",
            body.product_id
        )));
    }

    UserRepository::new(state.pool())
        .save_cart(user.id, &cart)
        .await?;

    Ok(Json(cart_view(&cart, dropped)))
}

/// Place an order for the current cart.
///
/// Debits the wallet, decrements stock, records the transaction, and
/// clears the cart in one database transaction.
#[instrument(skip(state, session, auth))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let user = load_active_user(&state, &session, &auth).await?;
    let (cart, _) = decode_cart(&user);

    let checkout = CheckoutService::new(state.pool());
    let record = checkout.place_order(user.id, &auth.email, &cart).await?;

    // Stock changed, so the cached listing is stale
    crate::services::catalog::invalidate(state.catalog_cache()).await;

    // Re-read the balance after the debit committed
    let remaining = UserRepository::new(state.pool())
        .find_by_id(user.id)
        .await?
        .map_or(Money::ZERO, |u| u.wallet);

    tracing::info!(
        user_id = %user.id,
        transaction_uuid = %record.transaction_uuid,
        total = %record.total,
        "order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            transaction_uuid: record.transaction_uuid,
            total: record.total,
            wallet_remaining: remaining,
        }),
    ))
}
