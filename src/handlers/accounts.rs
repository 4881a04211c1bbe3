//! Account management HTTP handlers.
//!
//! - POST /api/v1/accounts - Create new account
//! - GET /api/v1/accounts - List accounts
//! - GET /api/v1/accounts/{id} - Get account by ID
//! - PATCH /api/v1/accounts/{id} - Update profile fields
//! - GET /api/v1/accounts/{id}/balance - Current balance

use crate::{
    db::DbPool,
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::account::{
        Account, AccountListQuery, BalanceResponse, CreateAccountRequest, UpdateAccountRequest,
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

const ACCOUNT_COLUMNS: &str = "id, email, first_name, last_name, phone_number, role, is_active, \
                               balance_cents, created_at, updated_at";

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "ada@example.com",
///   "first_name": "Ada",
///   "role": "writer"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the account, with `balance_cents` 0
/// - **400**: invalid email, or the email / phone number is taken
pub async fn create_account(
    State(pool): State<DbPool>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let result = sqlx::query_as::<_, Account>(&format!(
        r#"
        INSERT INTO accounts (email, first_name, last_name, phone_number, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ACCOUNT_COLUMNS}
        "#
    ))
    .bind(request.email.trim())
    .bind(request.first_name)
    .bind(request.last_name)
    .bind(request.phone_number)
    .bind(request.role)
    .fetch_one(&pool)
    .await;

    let account = match result {
        Ok(account) => account,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::InvalidRequest(
                "Account already exists".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(account_id = %account.id, role = ?account.role, "account created");

    Ok((StatusCode::CREATED, Json(account)))
}

/// List accounts, oldest first, paged with `skip` / `limit` (default 100).
pub async fn list_accounts(
    State(pool): State<DbPool>,
    ApiQuery(query): ApiQuery<AccountListQuery>,
) -> Result<Json<Vec<Account>>, AppError> {
    if query.skip < 0 || query.limit <= 0 {
        return Err(AppError::InvalidRequest(
            "skip must be >= 0 and limit > 0".to_string(),
        ));
    }

    let accounts = sqlx::query_as::<_, Account>(&format!(
        r#"
        SELECT {ACCOUNT_COLUMNS}
        FROM accounts
        ORDER BY created_at ASC
        OFFSET $1 LIMIT $2
        "#
    ))
    .bind(query.skip)
    .bind(query.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(accounts))
}

/// Get a specific account by ID.
///
/// - **200 OK**: account details
/// - **404**: no such account
pub async fn get_account(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
    ))
    .bind(account_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account))
}

/// Update profile fields of an account.
///
/// Only the fields of [`UpdateAccountRequest`] can change; sending any
/// other field (`balance_cents` included) is a 400.
pub async fn update_account(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    update.validate()?;

    let result = sqlx::query_as::<_, Account>(&format!(
        r#"
        UPDATE accounts
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            phone_number = COALESCE($4, phone_number),
            is_active = COALESCE($5, is_active),
            role = COALESCE($6, role),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {ACCOUNT_COLUMNS}
        "#
    ))
    .bind(account_id)
    .bind(update.first_name)
    .bind(update.last_name)
    .bind(update.phone_number)
    .bind(update.is_active)
    .bind(update.role)
    .fetch_optional(&pool)
    .await;

    match result {
        Ok(Some(account)) => Ok(Json(account)),
        Ok(None) => Err(AppError::AccountNotFound),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
            AppError::InvalidRequest("phone_number is already in use".to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Current balance of an account.
///
/// ```json
/// { "account_id": "550e8400-...", "balance_cents": 15000 }
/// ```
pub async fn get_balance(
    State(ledger): State<LedgerService>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<Json<BalanceResponse>, AppError> {
    let balance_cents = ledger.get_account_balance(account_id).await?;

    Ok(Json(BalanceResponse {
        account_id,
        balance_cents,
    }))
}
