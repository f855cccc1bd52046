//! HTTP+JSON exposure of the order lifecycle engine.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;

use crate::app_system::OrderSystem;
use crate::clients::{OrderClient, ProductClient, SessionClient};
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub products: ProductClient,
    pub sessions: SessionClient,
}

impl AppState {
    pub fn from_system(system: &OrderSystem) -> Self {
        Self {
            orders: system.order_client.clone(),
            products: system.product_client.clone(),
            sessions: system.session_client.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/pending", get(handlers::list_pending))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/approve", put(handlers::approve_order))
        .route("/orders/{id}/reject", put(handlers::reject_order))
        .route("/catalog", get(handlers::list_catalog))
        .route("/catalog/{id}", get(handlers::get_product))
        .route("/catalog/{id}/price", put(handlers::set_price))
        .route("/catalog/{id}/stock", get(handlers::get_stock))
        .route(
            "/session",
            get(handlers::whoami).delete(handlers::logout),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
