//! Order HTTP handlers.
//!
//! - POST /api/v1/orders - Place an order
//! - GET /api/v1/orders - List orders (`?status=draft|open|closed`)
//! - GET /api/v1/orders/{id} - Get order
//! - PUT, PATCH /api/v1/orders/{id} - Update order fields
//! - DELETE /api/v1/orders/{id} - Delete order
//! - GET /api/v1/accounts/{id}/orders - Orders of one client

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::order::{CreateOrderRequest, Order, OrderListQuery, UpdateOrderRequest},
    services::order_service,
};

/// Place an order. New orders are `draft` unless `status` says otherwise.
pub async fn create_order(
    State(pool): State<DbPool>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = order_service::create_order(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    State(pool): State<DbPool>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(order_service::list_orders(&pool, query.status).await?))
}

pub async fn get_order(
    State(pool): State<DbPool>,
    ApiPath(order_id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(order_service::get_order(&pool, order_id).await?))
}

/// Update an order. Both PUT and PATCH take a partial body.
pub async fn update_order(
    State(pool): State<DbPool>,
    ApiPath(order_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(
        order_service::update_order(&pool, order_id, update).await?,
    ))
}

/// Delete an order.
///
/// Returns 204 No Content on success, 404 if it doesn't exist.
pub async fn delete_order(
    State(pool): State<DbPool>,
    ApiPath(order_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    order_service::delete_order(&pool, order_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_client_orders(
    State(pool): State<DbPool>,
    ApiPath(client_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = order_service::list_client_orders(&pool, client_id, query.status).await?;

    Ok(Json(orders))
}
