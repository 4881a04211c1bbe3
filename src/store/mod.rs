//! Storage boundary of the ledger.
//!
//! The ledger never talks to a database handle directly; it is given a
//! [`LedgerStore`] when constructed. [`postgres::PgLedgerStore`] backs the
//! running server and [`memory::MemoryLedgerStore`] backs tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        account::Account,
        transaction::{BalanceDelta, NewTransaction, Transaction, TransactionStatus},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryLedgerStore;
pub use postgres::PgLedgerStore;

/// Account and transaction persistence used by the ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get_account(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Persist a new transaction in `pending` state.
    ///
    /// Fails with `InvalidRequest` if the reference is already taken and
    /// `AccountNotFound` if the account vanished.
    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, AppError>;

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Transaction>, AppError>;

    /// Move transaction `id` from `from` to `to`, applying `delta` to the
    /// owning account in the same atomic unit.
    ///
    /// Returns `Ok(None)` without side effects when the stored status is no
    /// longer `from`, which is how a lost race or an already-terminal row
    /// shows up.
    async fn transition(
        &self,
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
        delta: Option<BalanceDelta>,
    ) -> Result<Option<Transaction>, AppError>;

    /// All transactions of an account, oldest first.
    async fn list_by_account(
        &self,
        account_id: Uuid,
        status: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>, AppError>;
}
