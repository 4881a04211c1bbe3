//! Payment-provider callback endpoint.
//!
//! `POST /api/v1/payments/callback` is public: instead of an API key it is
//! authenticated by the HMAC signature over the raw body. A verified
//! callback settles the transaction whose reference it names.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};

use crate::{
    config::Config,
    error::AppError,
    models::{payment::CallbackPayload, transaction::Transaction},
    services::{LedgerService, payment_service},
};

/// Handle a provider callback.
///
/// - **200 OK**: transaction settled
/// - **400**: malformed body, unsupported charge status, or the
///   transaction was already settled (a redelivered callback)
/// - **401**: missing or invalid signature
/// - **404**: unknown reference
pub async fn payment_callback(
    State(config): State<Arc<Config>>,
    State(ledger): State<LedgerService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Transaction>, AppError> {
    let signature = headers
        .get(payment_service::SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());

    payment_service::verify_signature(&config.payment_webhook_secret, &body, signature)
        .inspect_err(|_| tracing::warn!("payment callback with invalid signature"))?;

    let payload: CallbackPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidRequest(format!("Malformed callback body: {e}")))?;

    tracing::info!(
        event = %payload.event,
        reference = %payload.data.reference,
        "payment callback received"
    );

    let status = payload.target_status()?;
    let transaction = ledger
        .confirm_transaction(&payload.data.reference, status)
        .await?;

    Ok(Json(transaction))
}
