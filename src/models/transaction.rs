//! Ledger transaction model and its API request types.
//!
//! The enums here are the single definition of kind, sign and status. They
//! map to PostgreSQL enum types through `sqlx::Type` and to JSON through
//! serde, so no layer converts them by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether money is coming into or leaving the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Direction a transaction of this kind takes when the caller does not
    /// say otherwise.
    pub fn default_sign(self) -> Sign {
        match self {
            TransactionKind::Deposit => Sign::Positive,
            TransactionKind::Withdrawal => Sign::Negative,
        }
    }
}

/// Direction of the balance change. Serialized as `"+"` / `"-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_sign", rename_all = "lowercase")]
pub enum Sign {
    #[serde(rename = "+", alias = "positive")]
    Positive,
    #[serde(rename = "-", alias = "negative")]
    Negative,
}

impl Sign {
    /// Signed balance delta for a non-negative magnitude.
    pub fn apply(self, amount_cents: i64) -> i64 {
        match self {
            Sign::Positive => amount_cents,
            Sign::Negative => -amount_cents,
        }
    }
}

/// Lifecycle of a transaction.
///
/// ```text
/// pending ──▶ completed   (balance applied once)
///    └──────▶ failed      (no balance effect)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    /// Only `pending → completed` and `pending → failed` exist.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (
                TransactionStatus::Pending,
                TransactionStatus::Completed | TransactionStatus::Failed
            )
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// A deposit or withdrawal and its lifecycle record.
///
/// Maps to the `transactions` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: Uuid,

    /// Unique token that correlates this row with the provider's callback.
    pub reference: String,

    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub sign: Sign,

    /// Magnitude in cents, always positive.
    pub amount_cents: i64,

    pub status: TransactionStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,

    /// Refreshed on every status change.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// The change this transaction makes to its account once completed.
    pub fn balance_delta(&self) -> BalanceDelta {
        BalanceDelta {
            account_id: self.account_id,
            delta_cents: self.sign.apply(self.amount_cents),
        }
    }
}

/// Validated input for inserting a pending transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub reference: String,
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub sign: Sign,
    pub amount_cents: i64,
    pub description: Option<String>,
}

/// Signed balance change applied together with a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDelta {
    pub account_id: Uuid,
    pub delta_cents: i64,
}

/// Request to open a deposit or withdrawal.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "kind": "deposit",
///   "amount_cents": 5000,
///   "sign": "+",
///   "description": "Top-up"
/// }
/// ```
///
/// `sign` defaults from `kind` (deposit `+`, withdrawal `-`). `reference`
/// may carry a token issued by the payment provider; otherwise one is
/// generated.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    #[serde(default)]
    pub sign: Option<Sign>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Request body for `POST /api/v1/transactions/{reference}/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmTransactionRequest {
    pub status: TransactionStatus,
}

/// Query string for transaction listings.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub status: Option<TransactionStatus>,
}
