//! Business logic services.
//!
//! Services hold the rules and database work; handlers only translate
//! between HTTP and these functions.

pub mod ledger;
pub mod order_service;
pub mod payment_service;
pub mod profile_service;

pub use ledger::LedgerService;
