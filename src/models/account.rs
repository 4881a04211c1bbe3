//! Account data models and API request/response types.
//!
//! An account is a marketplace user (client, writer or admin) together with
//! the balance the ledger maintains for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum AccountRole {
    Client,
    Writer,
    Admin,
}

/// Represents an account record from the database.
///
/// # Balance Storage
///
/// Balances are `i64` cents. They may go negative: a completed withdrawal
/// is applied even when it overdraws.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: AccountRole,
    pub is_active: bool,

    /// Current balance in cents. Written only by the ledger.
    pub balance_cents: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "ada@example.com",
///   "first_name": "Ada",
///   "last_name": "Lovelace",
///   "role": "writer"
/// }
/// ```
///
/// New accounts always start at a zero balance.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_role")]
    pub role: AccountRole,
}

fn default_role() -> AccountRole {
    AccountRole::Client
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::InvalidRequest(
                "email must be a valid address".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update of an account profile.
///
/// Lists every field a caller may change. Absent fields are left alone; the
/// balance is deliberately not here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<AccountRole>,
}

impl UpdateAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.is_active.is_none()
            && self.role.is_none()
        {
            return Err(AppError::InvalidRequest(
                "update must change at least one field".to_string(),
            ));
        }
        if let Some(phone) = &self.phone_number {
            if phone.trim().is_empty() {
                return Err(AppError::InvalidRequest(
                    "phone_number must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Query string for `GET /api/v1/accounts`.
#[derive(Debug, Deserialize)]
pub struct AccountListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Response body for `GET /api/v1/accounts/{id}/balance`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub account_id: Uuid,
    pub balance_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_cannot_be_updated_through_profile_patch() {
        let result: Result<UpdateAccountRequest, _> =
            serde_json::from_str(r#"{"balance_cents": 1000000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(UpdateAccountRequest::default().validate().is_err());

        let patch = UpdateAccountRequest {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn new_accounts_default_to_client_role() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"email":"c@example.com"}"#).unwrap();
        assert_eq!(request.role, AccountRole::Client);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"email":"nobody"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
