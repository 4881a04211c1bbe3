//! HTTP request handlers.
//!
//! Each handler extracts request data, calls into a service or the
//! database, and returns JSON or an [`AppError`](crate::error::AppError).

/// Account management endpoints
pub mod accounts;
/// Health check
pub mod health;
/// Order endpoints
pub mod orders;
/// Payment-provider callback
pub mod payments;
/// Writer and client profiles
pub mod profiles;
/// Ledger transaction endpoints
pub mod transactions;
