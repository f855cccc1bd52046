//! Handlers for the admin review and customer tracking surfaces.

use super::auth::Authenticated;
use super::error::ApiError;
use super::extract::JsonBody;
use super::AppState;
use crate::domain::{LineRequest, Order, Product, Role};
use crate::product_actor::ProductError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub items: Vec<LineRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetPriceRequest {
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub item_id: String,
    pub stock: u32,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    JsonBody(request): JsonBody<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .orders
        .create_order(&identity, &request.user_id, request.items)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_pending(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_pending(&identity).await?))
}

/// `GET /orders?userId=`. Without a `userId` the caller's own history is returned.
pub async fn list_orders(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let user_id = query.user_id.unwrap_or_else(|| identity.user_id.clone());
    Ok(Json(state.orders.list_for_user(&user_id, &identity).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get_order(&id, &identity).await?))
}

pub async fn approve_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.approve(&id, &identity).await?))
}

pub async fn reject_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.reject(&id, &identity).await?))
}

pub async fn list_catalog(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let mut products = state.products.list_products().await?;
    products.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.products.get_product(id.clone()).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ProductError::NotFound(id).into()),
    }
}

/// Catalog price edit. Admins only; placed orders keep their price snapshot.
pub async fn set_price(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<SetPriceRequest>,
) -> Result<Json<Product>, ApiError> {
    if !identity.is_admin() {
        return Err(ApiError::Forbidden("admin role required".to_string()));
    }
    Ok(Json(state.products.set_price(id, request.price).await?))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StockLevel>, ApiError> {
    let stock = state.products.check_stock(id.clone()).await?;
    Ok(Json(StockLevel { item_id: id, stock }))
}

pub async fn whoami(Authenticated(identity): Authenticated) -> Json<WhoAmI> {
    Json(WhoAmI {
        user_id: identity.user_id,
        role: identity.role,
    })
}

pub async fn logout(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
) -> Result<StatusCode, ApiError> {
    state.sessions.revoke(&identity.credential).await?;
    Ok(StatusCode::NO_CONTENT)
}
