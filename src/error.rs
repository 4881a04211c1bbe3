//! Error types and HTTP error response handling.
//!
//! Every failure a handler or the ledger can produce is an [`AppError`].
//! The variants fall into the three caller-facing kinds of the ledger
//! (not found, invalid argument, invalid state) plus authentication and
//! storage failures.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed.
    ///
    /// Returns HTTP 500 and hides the details from the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API key is missing or does not match the configured digest.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Payment callback carried a missing or wrong signature.
    #[error("Invalid callback signature")]
    InvalidSignature,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400. The String says what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The operation is not allowed from the record's current state,
    /// e.g. confirming a transaction that is already completed or failed.
    ///
    /// Returns HTTP 400.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Caller-facing classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    InvalidState,
    Unauthorized,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::AccountNotFound
            | AppError::TransactionNotFound
            | AppError::OrderNotFound
            | AppError::ProfileNotFound => ErrorKind::NotFound,
            AppError::InvalidRequest(_) => ErrorKind::InvalidArgument,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::InvalidApiKey | AppError::InvalidSignature => ErrorKind::Unauthorized,
            AppError::Database(_) => ErrorKind::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "internal_error",
            AppError::InvalidApiKey => "invalid_api_key",
            AppError::InvalidSignature => "invalid_signature",
            AppError::AccountNotFound => "account_not_found",
            AppError::TransactionNotFound => "transaction_not_found",
            AppError::OrderNotFound => "order_not_found",
            AppError::ProfileNotFound => "profile_not_found",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::InvalidState(_) => "invalid_state",
        }
    }
}

// Extractor rejections (malformed JSON, unknown enum variants, bad query
// strings or path ids) are client errors like any other invalid argument.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - not found → 404
/// - invalid argument / invalid state → 400
/// - bad API key / bad signature → 401
/// - `Database` → 500
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument | ErrorKind::InvalidState => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                "An internal error occurred".to_string()
            }
            AppError::InvalidRequest(msg) | AppError::InvalidState(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_distinct_status_codes() {
        assert_eq!(
            AppError::TransactionNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidRequest("amount".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidState("terminal".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidSignature.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
