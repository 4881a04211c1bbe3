//! Operator API key authentication middleware.
//!
//! Management routes require `Authorization: Bearer <key>`. The key is
//! hashed with SHA-256 and compared against the digest from configuration,
//! so the plaintext key is never stored.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{config::Config, error::AppError};

/// Hex SHA-256 digest of an API key, the form kept in `API_KEY_SHA256`.
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Reject the request with 401 unless it carries the operator key.
pub async fn require_api_key(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidApiKey)?;

    if hash_api_key(api_key) != config.api_key_sha256 {
        tracing::warn!("request with unknown API key");
        return Err(AppError::InvalidApiKey);
    }

    Ok(next.run(request).await)
}
