use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::MessageResponse;
use crate::error::{ApiError, Result};
use crate::models::{CreateOrderRequest, OrderDetails, UpdateOrderStatusRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<OrderDetails>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: OrderDetails,
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<OrderListResponse>> {
    let orders = state.order_service.list_orders().await?;

    Ok(Json(OrderListResponse {
        success: true,
        orders,
    }))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>> {
    let order = state.order_service.get_order(id).await?;

    Ok(Json(OrderResponse {
        success: true,
        message: None,
        order,
    }))
}

/// POST /api/orders - the order workflow
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let customer_id = payload
        .customer_id
        .ok_or_else(|| ApiError::validation("customer_id is required"))?;

    let order = state
        .order_service
        .create_order(customer_id, &payload.items)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            message: Some("Order created successfully".to_string()),
            order,
        }),
    ))
}

/// PUT /api/orders/{id} - status update only; composition is immutable
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state.order_service.update_status(id, payload.status).await?;

    Ok(Json(OrderResponse {
        success: true,
        message: Some("Order status updated successfully".to_string()),
        order,
    }))
}

/// DELETE /api/orders/{id} - cascades to items, never restocks
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.order_service.delete_order(id).await?;

    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
