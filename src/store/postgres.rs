//! PostgreSQL implementation of [`LedgerStore`].
//!
//! # Atomicity
//!
//! `transition` runs the guarded status update and the balance update in
//! one database transaction. The status update only matches while the row
//! still holds the expected status, so when two confirmations race the
//! second one blocks on the row lock, re-checks the predicate after the
//! first commits and updates nothing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::Account,
        transaction::{BalanceDelta, NewTransaction, Transaction, TransactionStatus},
    },
    store::LedgerStore,
};

/// SQLSTATE raised when `balance_cents + delta` leaves the BIGINT range.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: DbPool,
}

impl PgLedgerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn get_account(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, first_name, last_name, phone_number, role, is_active,
                   balance_cents, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, AppError> {
        let result = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (reference, account_id, kind, sign, amount_cents, description, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(&new.reference)
        .bind(new.account_id)
        .bind(new.kind)
        .bind(new.sign)
        .bind(new.amount_cents)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(transaction) => Ok(transaction),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                AppError::InvalidRequest(format!("reference '{}' is already in use", new.reference)),
            ),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(AppError::AccountNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Transaction>, AppError> {
        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE reference = $1")
                .bind(reference)
                .fetch_optional(&self.pool)
                .await?;

        Ok(transaction)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
        delta: Option<BalanceDelta>,
    ) -> Result<Option<Transaction>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-set on status; the row lock is held until commit
        let updated = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET status = $1,
                updated_at = clock_timestamp()
            WHERE id = $2 AND status = $3
            RETURNING *
            "#,
        )
        .bind(to)
        .bind(id)
        .bind(from)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(transaction) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(delta) = delta {
            let result = sqlx::query(
                r#"
                UPDATE accounts
                SET balance_cents = balance_cents + $1,
                    updated_at = NOW()
                WHERE id = $2
                "#,
            )
            .bind(delta.delta_cents)
            .bind(delta.account_id)
            .execute(&mut *tx)
            .await;

            let updated_count = match result {
                Ok(done) => done.rows_affected(),
                Err(sqlx::Error::Database(e))
                    if e.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) =>
                {
                    tx.rollback().await?;
                    return Err(AppError::InvalidState(
                        "balance would overflow".to_string(),
                    ));
                }
                Err(e) => return Err(e.into()),
            };

            if updated_count == 0 {
                tx.rollback().await?;
                return Err(AppError::AccountNotFound);
            }
        }

        tx.commit().await?;

        Ok(Some(transaction))
    }

    async fn list_by_account(
        &self,
        account_id: Uuid,
        status: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE account_id = $1
              AND ($2::transaction_status IS NULL OR status = $2)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(account_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
