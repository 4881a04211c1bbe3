//! In-process [`LedgerStore`] used by tests and local experiments.
//!
//! All state sits behind one `tokio::sync::Mutex`, so every method, and in
//! particular `transition`, observes and mutates it as a single unit.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        account::{Account, AccountRole},
        transaction::{BalanceDelta, NewTransaction, Transaction, TransactionStatus},
    },
    store::LedgerStore,
};

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<Uuid, Account>,
    /// Insertion order doubles as creation order.
    transactions: Vec<Transaction>,
}

#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    state: Mutex<MemoryState>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client account holding `balance_cents`.
    pub async fn add_account(&self, email: &str, balance_cents: i64) -> Account {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            phone_number: None,
            role: AccountRole::Client,
            is_active: true,
            balance_cents,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .await
            .accounts
            .insert(account.id, account.clone());
        account
    }

    pub async fn transaction_count(&self) -> usize {
        self.state.lock().await.transactions.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn get_account(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self.state.lock().await.accounts.get(&id).cloned())
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, AppError> {
        let mut state = self.state.lock().await;

        if !state.accounts.contains_key(&new.account_id) {
            return Err(AppError::AccountNotFound);
        }
        if state
            .transactions
            .iter()
            .any(|t| t.reference == new.reference)
        {
            return Err(AppError::InvalidRequest(format!(
                "reference '{}' is already in use",
                new.reference
            )));
        }

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            reference: new.reference,
            account_id: new.account_id,
            kind: new.kind,
            sign: new.sign,
            amount_cents: new.amount_cents,
            status: TransactionStatus::Pending,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        state.transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Transaction>, AppError> {
        Ok(self
            .state
            .lock()
            .await
            .transactions
            .iter()
            .find(|t| t.reference == reference)
            .cloned())
    }

    async fn transition(
        &self,
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
        delta: Option<BalanceDelta>,
    ) -> Result<Option<Transaction>, AppError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let Some(transaction) = state
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.status == from)
        else {
            return Ok(None);
        };

        let now = Utc::now();

        // Check the account before mutating anything so a failure leaves
        // both records as they were
        if let Some(delta) = delta {
            let account = state
                .accounts
                .get_mut(&delta.account_id)
                .ok_or(AppError::AccountNotFound)?;
            account.balance_cents = account
                .balance_cents
                .checked_add(delta.delta_cents)
                .ok_or_else(|| AppError::InvalidState("balance would overflow".to_string()))?;
            account.updated_at = now;
        }

        transaction.status = to;
        transaction.updated_at = now;

        Ok(Some(transaction.clone()))
    }

    async fn list_by_account(
        &self,
        account_id: Uuid,
        status: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>, AppError> {
        let state = self.state.lock().await;
        let mut transactions: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.created_at);

        Ok(transactions)
    }
}
