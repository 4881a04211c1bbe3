//! Transaction HTTP handlers.
//!
//! - POST /api/v1/transactions - Open a pending deposit or withdrawal
//! - GET /api/v1/transactions/{reference} - Get transaction details
//! - POST /api/v1/transactions/{reference}/confirm - Settle a pending transaction
//! - GET /api/v1/accounts/{id}/transactions - List an account's transactions

use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::transaction::{
        ConfirmTransactionRequest, CreateTransactionRequest, Transaction, TransactionListQuery,
    },
    services::LedgerService,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Open a pending transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": "550e8400-...",
///   "kind": "deposit",
///   "amount_cents": 5000,
///   "description": "Top-up"
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "id": "770e8400-...",
///   "reference": "txn_5f0c9a1b2c3d4e5f60718293",
///   "account_id": "550e8400-...",
///   "kind": "deposit",
///   "sign": "+",
///   "amount_cents": 5000,
///   "status": "pending",
///   "description": "Top-up",
///   "created_at": "2025-12-21T16:00:00Z",
///   "updated_at": "2025-12-21T16:00:00Z"
/// }
/// ```
pub async fn create_transaction(
    State(ledger): State<LedgerService>,
    ApiJson(request): ApiJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let sign = request.sign.unwrap_or(request.kind.default_sign());

    let transaction = ledger
        .create_transaction(
            request.account_id,
            request.kind,
            request.amount_cents,
            sign,
            request.description,
            request.reference,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get_transaction(
    State(ledger): State<LedgerService>,
    ApiPath(reference): ApiPath<String>,
) -> Result<Json<Transaction>, AppError> {
    Ok(Json(ledger.get_transaction(&reference).await?))
}

/// Settle a pending transaction from inside the marketplace.
///
/// # Request Body
///
/// ```json
/// { "status": "completed" }
/// ```
///
/// - **200 OK**: the settled transaction
/// - **400**: transaction is not pending
/// - **404**: unknown reference
pub async fn confirm_transaction(
    State(ledger): State<LedgerService>,
    ApiPath(reference): ApiPath<String>,
    ApiJson(request): ApiJson<ConfirmTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = ledger
        .confirm_transaction(&reference, request.status)
        .await?;

    Ok(Json(transaction))
}

/// List an account's transactions in creation order.
///
/// Accepts `?status=pending|completed|failed`.
pub async fn list_account_transactions(
    State(ledger): State<LedgerService>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<TransactionListQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = ledger.list_transactions(account_id, query.status).await?;

    Ok(Json(transactions))
}
