//! Order API Handlers
//!
//! Placing an order snapshots the dish/change names and prices from the
//! request; the total is always recomputed server-side by the pricing
//! engine and never includes the tip.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use shared::models as api;

use crate::AppError;
use crate::auth::{CurrentUser, RESTAURANT_STAFF};
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::db::repository::{OrderRepository, ProfileRepository};
use crate::pricing;
use crate::utils::validation::validate_payload;

/// POST /api/order/{restaurant_id}/{table_number} - 下单 (公开)
pub async fn create(
    State(state): State<ServerState>,
    Path((restaurant_id, table_number)): Path<(String, i64)>,
    Json(payload): Json<OrderCreate>,
) -> Result<Json<api::Order>, AppError> {
    validate_payload(&payload)?;
    pricing::validate_items(&payload.items)?;

    // The restaurant must exist before anything is persisted
    let profiles = ProfileRepository::new(state.get_db());
    let profile = profiles
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    let restaurant = profile
        .id
        .ok_or_else(|| AppError::Internal("Stored profile is missing its id".to_string()))?;

    let total_price = pricing::to_f64(pricing::order_total(&payload.items));

    let order = Order {
        id: None,
        restaurant,
        table_number,
        created_at: Utc::now(),
        status: false,
        items: payload.items,
        tip: payload.tip,
        total_price,
    };

    let repo = OrderRepository::new(state.get_db());
    let created = repo.create(order).await?;

    tracing::info!(
        restaurant = %created.restaurant,
        table = table_number,
        total = total_price,
        "Order placed"
    );

    Ok(Json(created.into()))
}

/// GET /api/order/me - 本餐厅的全部订单
///
/// The caller is resolved to a restaurant through their own profile
/// (as owner or registered worker).
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<api::Order>>, AppError> {
    let restaurant = resolve_restaurant(&state, &user).await?;

    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_for_restaurant(&restaurant).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// PUT /api/order/{order_id} - 编辑订单条目 (本餐厅员工)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> Result<Json<api::Order>, AppError> {
    user.authorize(RESTAURANT_STAFF)?;
    validate_payload(&payload)?;
    pricing::validate_items(&payload.items)?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    // Ownership check: the order must belong to the caller's restaurant
    let restaurant = resolve_restaurant(&state, &user).await?;
    if order.restaurant.to_string() != restaurant {
        tracing::warn!(
            user_id = %user.id,
            order = %order.restaurant,
            caller_restaurant = %restaurant,
            "Rejected cross-restaurant order edit"
        );
        return Err(AppError::Forbidden(
            "Order belongs to a different restaurant".to_string(),
        ));
    }

    let total_price = pricing::to_f64(pricing::order_total(&payload.items));
    let order_key = order
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or(order_id);
    let updated = repo
        .replace_items(&order_key, payload.items, total_price)
        .await?;

    Ok(Json(updated.into()))
}

/// Resolve the caller to their restaurant's profile id
async fn resolve_restaurant(state: &ServerState, user: &CurrentUser) -> Result<String, AppError> {
    let profiles = ProfileRepository::new(state.get_db());
    let profile = profiles
        .find_by_member(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("There is no restaurant for this user".to_string()))?;
    profile
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::Internal("Stored profile is missing its id".to_string()))
}
