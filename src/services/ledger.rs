//! Ledger service - deposits, withdrawals and their settlement.
//!
//! A transaction is recorded as `pending` and later settled by a
//! confirmation, usually the payment provider's callback. Settling to
//! `completed` moves the account balance; settling to `failed` does not.
//!
//! # At-most-once balance application
//!
//! The balance delta is only ever applied through
//! [`LedgerStore::transition`], which compare-and-sets the status from
//! `pending` in the same atomic unit. Of any number of concurrent or
//! repeated confirmations of one reference exactly one can win; the rest
//! see `InvalidState`.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Sign, Transaction, TransactionKind, TransactionStatus},
    store::LedgerStore,
};

/// Prefix of generated references.
const REFERENCE_PREFIX: &str = "txn_";

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Record a pending deposit or withdrawal.
    ///
    /// The account balance is not touched. When `reference` is `None` a
    /// fresh one is generated.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: amount is zero or negative, or the reference is
    ///   blank or already used
    /// - `AccountNotFound`: account doesn't exist
    pub async fn create_transaction(
        &self,
        account_id: Uuid,
        kind: TransactionKind,
        amount_cents: i64,
        sign: Sign,
        description: Option<String>,
        reference: Option<String>,
    ) -> Result<Transaction, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }

        let reference = match reference {
            Some(r) if r.trim().is_empty() => {
                return Err(AppError::InvalidRequest(
                    "reference must not be blank".to_string(),
                ));
            }
            Some(r) => r,
            None => generate_reference(),
        };

        if self.store.get_account(account_id).await?.is_none() {
            return Err(AppError::AccountNotFound);
        }

        let transaction = self
            .store
            .insert_transaction(NewTransaction {
                reference,
                account_id,
                kind,
                sign,
                amount_cents,
                description,
            })
            .await?;

        tracing::info!(
            reference = %transaction.reference,
            account_id = %account_id,
            kind = ?kind,
            amount_cents,
            "transaction created"
        );

        Ok(transaction)
    }

    /// Settle a pending transaction.
    ///
    /// `pending → completed` applies the signed amount to the account
    /// balance together with the status change; `pending → failed` only
    /// changes the status.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound`: no transaction has this reference
    /// - `InvalidState`: the transaction is already completed or failed
    ///   (including losing a race against a concurrent confirmation), or
    ///   `new_status` is `pending`
    pub async fn confirm_transaction(
        &self,
        reference: &str,
        new_status: TransactionStatus,
    ) -> Result<Transaction, AppError> {
        let current = self
            .store
            .find_by_reference(reference)
            .await?
            .ok_or(AppError::TransactionNotFound)?;

        if !current.status.can_transition_to(new_status) {
            tracing::warn!(
                reference,
                from = current.status.as_str(),
                to = new_status.as_str(),
                "rejected transaction confirmation"
            );
            return Err(AppError::InvalidState(format!(
                "cannot move transaction from {} to {}",
                current.status.as_str(),
                new_status.as_str()
            )));
        }

        let delta = match new_status {
            TransactionStatus::Completed => Some(current.balance_delta()),
            _ => None,
        };

        let settled = self
            .store
            .transition(current.id, TransactionStatus::Pending, new_status, delta)
            .await?
            .ok_or_else(|| {
                tracing::warn!(reference, "transaction settled concurrently");
                AppError::InvalidState("transaction is already settled".to_string())
            })?;

        tracing::info!(
            reference,
            account_id = %settled.account_id,
            status = settled.status.as_str(),
            "transaction settled"
        );

        Ok(settled)
    }

    /// Transactions of an account in creation order, optionally filtered by
    /// status.
    pub async fn list_transactions(
        &self,
        account_id: Uuid,
        status: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>, AppError> {
        if self.store.get_account(account_id).await?.is_none() {
            return Err(AppError::AccountNotFound);
        }

        self.store.list_by_account(account_id, status).await
    }

    pub async fn get_transaction(&self, reference: &str) -> Result<Transaction, AppError> {
        self.store
            .find_by_reference(reference)
            .await?
            .ok_or(AppError::TransactionNotFound)
    }

    /// Current balance of an account in cents.
    pub async fn get_account_balance(&self, account_id: Uuid) -> Result<i64, AppError> {
        let account = self
            .store
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        Ok(account.balance_cents)
    }
}

/// `txn_` followed by 24 hex chars (12 random bytes).
fn generate_reference() -> String {
    let bytes: [u8; 12] = rand::random();
    format!("{REFERENCE_PREFIX}{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_references_are_prefixed_and_distinct() {
        let a = generate_reference();
        let b = generate_reference();

        assert!(a.starts_with(REFERENCE_PREFIX));
        assert_eq!(a.len(), REFERENCE_PREFIX.len() + 24);
        assert_ne!(a, b);
    }
}
