//! Order endpoints, all requiring auth.
//!
//! - POST /api/v1/order/new - Place an order
//! - GET /api/v1/orders/me - The caller's orders
//! - GET /api/v1/order/:id - One of the caller's orders

use crate::auth::AuthUser;
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use storefront_core::model::{NewOrder, Order, OrderTotals};
use storefront_web::{ApiError, ResourceId, ValidJson};
use uuid::Uuid;

/// Status of a freshly placed order.
pub const INITIAL_STATUS: &str = "Processing";

/// Single order response.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Always `true`.
    pub success: bool,
    /// The order.
    pub order: Order,
}

/// Order list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    /// Always `true`.
    pub success: bool,
    /// Sum of `totalPrice` over `orders`.
    pub total_amount: f64,
    /// The orders, oldest first.
    pub orders: Vec<Order>,
}

/// Place an order.
///
/// Lines and totals are priced from the catalogue; the prices the client
/// sent are only compared against them.
///
/// # Errors
///
/// - Validation fault when the order has no lines.
/// - 404 when a line references an unknown product.
/// - 400 when a line asks for more than is in stock.
pub async fn new_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(order): ValidJson<NewOrder>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    if order.order_items.is_empty() {
        return Err(ApiError::validation("Please add at least one order item"));
    }
    if let Some(line) = order.order_items.iter().find(|line| line.quantity == 0) {
        return Err(ApiError::validation(format!(
            "Quantity for {} must be at least 1",
            line.name
        )));
    }

    let order_items = state.products.reserve_stock(&order.order_items).await?;
    let totals = OrderTotals::for_lines(&order_items);
    if (totals.total_price - order.total_price).abs() >= 0.005 {
        tracing::warn!(
            user_id = %user.id,
            submitted = order.total_price,
            charged = totals.total_price,
            "Submitted order total differs from catalogue prices"
        );
    }

    let order = Order {
        id: Uuid::new_v4(),
        user: user.id,
        shipping_info: order.shipping_info,
        order_items,
        payment_info: order.payment_info,
        items_price: totals.items_price,
        tax_price: totals.tax_price,
        shipping_price: totals.shipping_price,
        total_price: totals.total_price,
        order_status: INITIAL_STATUS.to_string(),
        created_at: state.clock.now(),
    };
    state.orders.insert(order.clone()).await;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        lines = order.order_items.len(),
        total = order.total_price,
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            order,
        }),
    ))
}

/// Orders of the caller.
pub async fn my_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<OrdersResponse> {
    let orders = state.orders.for_user(user.id).await;
    let total_amount = orders.iter().map(|o| o.total_price).sum();

    Json(OrdersResponse {
        success: true,
        total_amount,
        orders,
    })
}

/// One order of the caller.
///
/// Orders of other users are reported as missing.
///
/// # Errors
///
/// - Cast fault when the id is malformed.
/// - 404 `No Order found with this ID` otherwise.
pub async fn get_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .orders
        .find(id)
        .await
        .filter(|order| order.user == user.id)
        .ok_or_else(|| ApiError::not_found("No Order found with this ID"))?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}
