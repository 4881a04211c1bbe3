//! Order persistence.
//!
//! Straight CRUD over the `orders` table. Updates go through the explicit
//! [`UpdateOrderRequest`] and are applied to a row locked for the duration
//! of the write.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::order::{CreateOrderRequest, Order, OrderStatus, UpdateOrderRequest},
};

pub async fn create_order(pool: &DbPool, request: CreateOrderRequest) -> Result<Order, AppError> {
    request.validate()?;

    let result = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (
            product, deadline, for_final_date, language, level, service, quantity,
            space, words_count, size_type, topic, description, price_cents, subject,
            number_of_sources, style, is_private, promocode, client_id, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING *
        "#,
    )
    .bind(request.product)
    .bind(request.deadline)
    .bind(request.for_final_date)
    .bind(request.language)
    .bind(request.level)
    .bind(request.service)
    .bind(request.quantity)
    .bind(request.space)
    .bind(request.words_count)
    .bind(request.size_type)
    .bind(request.topic)
    .bind(request.description)
    .bind(request.price_cents)
    .bind(request.subject)
    .bind(request.number_of_sources)
    .bind(request.style)
    .bind(request.is_private)
    .bind(request.promocode)
    .bind(request.client_id)
    .bind(request.status)
    .fetch_one(pool)
    .await;

    match result {
        Ok(order) => {
            tracing::info!(order_id = %order.id, client_id = %order.client_id, "order created");
            Ok(order)
        }
        // Unknown client_id
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            Err(AppError::AccountNotFound)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_order(pool: &DbPool, order_id: Uuid) -> Result<Order, AppError> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::OrderNotFound)
}

/// All orders, newest first, optionally filtered by status.
pub async fn list_orders(
    pool: &DbPool,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, AppError> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT * FROM orders
        WHERE ($1::order_status IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Orders placed by one client, newest first.
pub async fn list_client_orders(
    pool: &DbPool,
    client_id: Uuid,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
        .bind(client_id)
        .fetch_one(pool)
        .await?;

    if !exists {
        return Err(AppError::AccountNotFound);
    }

    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT * FROM orders
        WHERE client_id = $1
          AND ($2::order_status IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(client_id)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn update_order(
    pool: &DbPool,
    order_id: Uuid,
    update: UpdateOrderRequest,
) -> Result<Order, AppError> {
    update.validate()?;

    let mut tx = pool.begin().await?;

    let mut order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    update.apply_to(&mut order);

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET product = $2, deadline = $3, for_final_date = $4, language = $5, level = $6,
            service = $7, quantity = $8, space = $9, words_count = $10, size_type = $11,
            topic = $12, description = $13, price_cents = $14, subject = $15,
            number_of_sources = $16, style = $17, is_private = $18, promocode = $19,
            status = $20, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(order.id)
    .bind(order.product)
    .bind(order.deadline)
    .bind(order.for_final_date)
    .bind(order.language)
    .bind(order.level)
    .bind(order.service)
    .bind(order.quantity)
    .bind(order.space)
    .bind(order.words_count)
    .bind(&order.size_type)
    .bind(&order.topic)
    .bind(&order.description)
    .bind(order.price_cents)
    .bind(&order.subject)
    .bind(order.number_of_sources)
    .bind(order.style)
    .bind(order.is_private)
    .bind(&order.promocode)
    .bind(order.status)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(order)
}

pub async fn delete_order(pool: &DbPool, order_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(order_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::OrderNotFound);
    }

    tracing::info!(order_id = %order_id, "order deleted");

    Ok(())
}
