//! Backend for an academic-writing marketplace.
//!
//! Clients place orders, writers fulfil them, and a ledger of deposits and
//! withdrawals keeps account balances. The ledger ([`services::ledger`]) is
//! the part with real rules: transactions start `pending` and a balance
//! moves only when one is settled to `completed`, at most once.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
