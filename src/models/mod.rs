//! Data models shared by storage and the HTTP layer.

/// Marketplace accounts and balances
pub mod account;
/// Writing orders
pub mod order;
/// Payment-provider callback payload
pub mod payment;
/// Writer and client profiles
pub mod profile;
/// Ledger transactions
pub mod transaction;
