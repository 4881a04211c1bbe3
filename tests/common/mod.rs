// Helpers are shared by test files that are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;
use writing_market_server::config::Config;
use writing_market_server::middleware::auth::hash_api_key;
use writing_market_server::routes;
use writing_market_server::services::LedgerService;
use writing_market_server::state::AppState;
use writing_market_server::store::MemoryLedgerStore;

pub const API_KEY: &str = "test-operator-key";
pub const WEBHOOK_SECRET: &str = "sk_test_callback_secret";

/// Ledger over a fresh in-memory store; the store is returned for seeding.
pub fn test_ledger() -> (LedgerService, Arc<MemoryLedgerStore>) {
    let store = Arc::new(MemoryLedgerStore::new());
    let ledger = LedgerService::new(store.clone());
    (ledger, store)
}

pub fn test_config() -> Result<Config> {
    let vars = [
        ("DATABASE_URL", "postgres://localhost/unused"),
        ("API_KEY_SHA256", hash_api_key(API_KEY).as_str()),
        ("PAYMENT_WEBHOOK_SECRET", WEBHOOK_SECRET),
    ]
    .map(|(k, v)| (k.to_string(), v.to_string()));

    Ok(Config::from_vars(vars)?)
}

/// Router backed by the in-memory ledger.
///
/// The pool connects lazily and is never used by the ledger routes.
pub fn test_app() -> Result<(Router, Arc<MemoryLedgerStore>)> {
    let config = test_config()?;
    let pool = sqlx::postgres::PgPoolOptions::new().connect_lazy(&config.database_url)?;
    let (ledger, store) = test_ledger();
    let app = routes::router(AppState::new(pool, ledger, config));
    Ok((app, store))
}

pub fn authed_request(method: &str, uri: &str, body: Option<Value>) -> Result<Request<Body>> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {API_KEY}"))
        .header("Content-Type", "application/json");

    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    Ok(request)
}

pub async fn json_body(response: Response<Body>) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Hex HMAC-SHA512 of `body` under `secret`, as the payment provider
/// would send it.
pub fn sign_with(secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow!("invalid HMAC key: {e}"))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn sign_callback(body: &[u8]) -> Result<String> {
    sign_with(WEBHOOK_SECRET, body)
}
