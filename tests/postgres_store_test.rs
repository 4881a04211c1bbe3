//! Runs only when `TEST_DATABASE_URL` points at a scratch PostgreSQL database.

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use common::{authed_request, json_body, test_config};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use writing_market_server::db;
use writing_market_server::error::{AppError, ErrorKind};
use writing_market_server::models::account::AccountRole;
use writing_market_server::models::order::{CreateOrderRequest, OrderStatus, UpdateOrderRequest};
use writing_market_server::models::profile::{
    CreateClientProfileRequest, CreateWriterProfileRequest, UpdateClientProfileRequest,
    UpdateWriterProfileRequest,
};
use writing_market_server::models::transaction::{Sign, TransactionKind, TransactionStatus};
use writing_market_server::routes;
use writing_market_server::services::{LedgerService, order_service, profile_service};
use writing_market_server::state::AppState;
use writing_market_server::store::PgLedgerStore;

async fn pg_ledger() -> Result<Option<(LedgerService, db::DbPool)>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };
    let pool = db::create_pool(&url, 8).await?;
    db::run_migrations(&pool).await?;
    let ledger = LedgerService::new(Arc::new(PgLedgerStore::new(pool.clone())));
    Ok(Some((ledger, pool)))
}

async fn seed_account(pool: &db::DbPool, balance_cents: i64) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO accounts (email, balance_cents) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("{}@example.com", Uuid::new_v4()))
    .bind(balance_cents)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_account_with_role(pool: &db::DbPool, role: AccountRole) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO accounts (email, role) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("{}@example.com", Uuid::new_v4()))
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

fn order_request(client_id: Uuid) -> Result<CreateOrderRequest> {
    Ok(serde_json::from_value(json!({
        "product": 1,
        "deadline": "2030-01-15T12:00:00Z",
        "language": "english_uk",
        "level": 2,
        "service": "writing",
        "quantity": 3,
        "space": 1,
        "words_count": 825,
        "size_type": "pages",
        "topic": "Industrial revolution",
        "description": "Five paragraph essay",
        "subject": "History",
        "number_of_sources": 4,
        "style": 0,
        "client_id": client_id
    }))?)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_concurrent_confirmations_apply_once() -> Result<()> {
    let Some((ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let account_id = seed_account(&pool, 10_000).await?;

    let transaction = ledger
        .create_transaction(account_id, TransactionKind::Deposit, 5_000, Sign::Positive, None, None)
        .await?;
    let reference = Arc::new(transaction.reference);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ledger = ledger.clone();
        let reference = reference.clone();
        handles.push(tokio::spawn(async move {
            ledger
                .confirm_transaction(&reference, TransactionStatus::Completed)
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidState),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(ledger.get_account_balance(account_id).await?, 15_000);

    Ok(())
}

#[tokio::test]
async fn test_pg_duplicate_reference_and_filtering() -> Result<()> {
    let Some((ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let account_id = seed_account(&pool, 0).await?;
    let reference = format!("ext_{}", Uuid::new_v4().simple());

    let first = ledger
        .create_transaction(
            account_id,
            TransactionKind::Withdrawal,
            300,
            Sign::Negative,
            None,
            Some(reference.clone()),
        )
        .await?;
    let err = ledger
        .create_transaction(
            account_id,
            TransactionKind::Withdrawal,
            300,
            Sign::Negative,
            None,
            Some(reference.clone()),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    ledger
        .confirm_transaction(&first.reference, TransactionStatus::Failed)
        .await?;
    let second = ledger
        .create_transaction(account_id, TransactionKind::Deposit, 100, Sign::Positive, None, None)
        .await?;

    let failed = ledger
        .list_transactions(account_id, Some(TransactionStatus::Failed))
        .await?;
    let pending = ledger
        .list_transactions(account_id, Some(TransactionStatus::Pending))
        .await?;
    let all = ledger.list_transactions(account_id, None).await?;

    assert_eq!(failed.len(), 1);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(ledger.get_account_balance(account_id).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_pg_balance_overflow_rolls_back() -> Result<()> {
    let Some((ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let account_id = seed_account(&pool, i64::MAX - 10).await?;

    let transaction = ledger
        .create_transaction(account_id, TransactionKind::Deposit, 100, Sign::Positive, None, None)
        .await?;
    let err = ledger
        .confirm_transaction(&transaction.reference, TransactionStatus::Completed)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(ledger.get_account_balance(account_id).await?, i64::MAX - 10);
    assert_eq!(
        ledger.get_transaction(&transaction.reference).await?.status,
        TransactionStatus::Pending
    );

    Ok(())
}

#[tokio::test]
async fn test_pg_account_routes() -> Result<()> {
    let Some((ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let app = routes::router(AppState::new(pool, ledger, test_config()?));
    let email = format!("{}@example.com", Uuid::new_v4());

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/accounts",
            Some(json!({ "email": email, "first_name": "Ada", "last_name": "Lovelace", "role": "writer" })),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let account = json_body(response).await?;
    assert_eq!(account["role"], "writer");
    assert_eq!(account["balance_cents"], 0);
    let id = account["id"].as_str().unwrap_or_default().to_string();

    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/v1/accounts", Some(json!({ "email": email })))?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let phone = format!("+254{}", &Uuid::new_v4().simple().to_string()[..9]);
    let response = app
        .clone()
        .oneshot(authed_request(
            "PATCH",
            &format!("/api/v1/accounts/{id}"),
            Some(json!({ "first_name": "Grace", "phone_number": phone })),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await?;
    assert_eq!(updated["first_name"], "Grace");
    assert_eq!(updated["last_name"], "Lovelace");

    let response = app
        .clone()
        .oneshot(authed_request(
            "PATCH",
            &format!("/api/v1/accounts/{id}"),
            Some(json!({ "balance_cents": 1_000_000 })),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed_request("GET", &format!("/api/v1/accounts/{id}"), None)?)
        .await?;
    let fetched = json_body(response).await?;
    assert_eq!(fetched["first_name"], "Grace");
    assert_eq!(fetched["balance_cents"], 0);

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/v1/accounts?skip=0&limit=5", None)?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await?.as_array().is_some_and(|a| a.len() <= 5));

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/v1/accounts?skip=-1", None)?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(authed_request("GET", &format!("/api/v1/accounts/{}", Uuid::new_v4()), None)?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_pg_order_lifecycle() -> Result<()> {
    let Some((_ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let client_id = seed_account(&pool, 0).await?;

    let order = order_service::create_order(&pool, order_request(client_id)?).await?;
    assert_eq!(order.status, OrderStatus::Draft);
    assert_eq!(order.client_id, client_id);

    let updated = order_service::update_order(
        &pool,
        order.id,
        UpdateOrderRequest {
            topic: Some("Steam engines".to_string()),
            status: Some(OrderStatus::Open),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.topic, "Steam engines");
    assert_eq!(updated.status, OrderStatus::Open);
    assert_eq!(updated.quantity, 3);

    let open = order_service::list_client_orders(&pool, client_id, Some(OrderStatus::Open)).await?;
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, order.id);
    let closed =
        order_service::list_client_orders(&pool, client_id, Some(OrderStatus::Closed)).await?;
    assert!(closed.is_empty());
    let all_open = order_service::list_orders(&pool, Some(OrderStatus::Open)).await?;
    assert!(all_open.iter().any(|o| o.id == order.id));

    let err = order_service::create_order(&pool, order_request(Uuid::new_v4())?)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound));
    let err = order_service::list_client_orders(&pool, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound));

    order_service::delete_order(&pool, order.id).await?;
    let err = order_service::get_order(&pool, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::OrderNotFound));
    let err = order_service::delete_order(&pool, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::OrderNotFound));

    Ok(())
}

#[tokio::test]
async fn test_pg_writer_profile_lifecycle() -> Result<()> {
    let Some((_ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let writer_id = seed_account_with_role(&pool, AccountRole::Writer).await?;
    let client_id = seed_account_with_role(&pool, AccountRole::Client).await?;

    let err = profile_service::create_writer_profile(
        &pool,
        client_id,
        CreateWriterProfileRequest::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let profile = profile_service::create_writer_profile(
        &pool,
        writer_id,
        CreateWriterProfileRequest {
            about_me: Some("History graduate".to_string()),
            skills: vec!["history".to_string()],
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(profile.skills, vec!["history".to_string()]);
    assert!(profile.languages.is_empty());

    let err = profile_service::create_writer_profile(
        &pool,
        writer_id,
        CreateWriterProfileRequest::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let updated = profile_service::update_writer_profile(
        &pool,
        writer_id,
        UpdateWriterProfileRequest {
            success_rate: Some(97.5),
            skills: Some(vec!["essays".to_string(), "economics".to_string()]),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.about_me.as_deref(), Some("History graduate"));
    assert_eq!(updated.skills.len(), 2);
    assert_eq!(updated.success_rate, 97.5);

    profile_service::delete_writer_profile(&pool, writer_id).await?;
    let err = profile_service::get_writer_profile(&pool, writer_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProfileNotFound));

    Ok(())
}

#[tokio::test]
async fn test_pg_client_profile_lifecycle() -> Result<()> {
    let Some((_ledger, pool)) = pg_ledger().await? else {
        return Ok(());
    };
    let client_id = seed_account_with_role(&pool, AccountRole::Client).await?;

    let err = profile_service::create_client_profile(
        &pool,
        Uuid::new_v4(),
        CreateClientProfileRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound));

    let profile = profile_service::create_client_profile(
        &pool,
        client_id,
        CreateClientProfileRequest {
            country: Some("KE".to_string()),
            pay_rate_cents: 1_200,
            accepted_orders: 0,
        },
    )
    .await?;
    assert_eq!(profile.pay_rate_cents, 1_200);

    let updated = profile_service::update_client_profile(
        &pool,
        client_id,
        UpdateClientProfileRequest {
            accepted_orders: Some(3),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.accepted_orders, 3);
    assert_eq!(updated.country.as_deref(), Some("KE"));

    profile_service::delete_client_profile(&pool, client_id).await?;
    let err = profile_service::delete_client_profile(&pool, client_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProfileNotFound));

    Ok(())
}
