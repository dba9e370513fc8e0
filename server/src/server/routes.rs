//! Router configuration for the storefront server.
//!
//! Builds the complete Axum router with all endpoints.

use super::state::AppState;
use crate::api::{orders, ping, products, users};
use axum::{
    Router,
    routing::{get, post},
};
use storefront_web::{correlation_id_layer, handlers::health_check, panic_response, route_not_found};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Prefix every API route is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Routes under [`API_PREFIX`].
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalogue
        .route("/products", get(products::list_products))
        .route("/product/:id", get(products::get_product))
        // Accounts
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", get(users::logout))
        .route("/me", get(users::me))
        // Orders
        .route("/order/new", post(orders::new_order))
        .route("/orders/me", get(orders::my_orders))
        .route("/order/:id", get(orders::get_order))
}

/// Build the complete Axum router.
///
/// Unknown routes, extractor rejections and handler panics all come back in
/// the `{success:false, message}` shape.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Liveness and uptime ping (no authentication)
        .route("/health", get(health_check))
        .route("/ping", get(ping::ping))
        .nest(API_PREFIX, api_routes())
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
