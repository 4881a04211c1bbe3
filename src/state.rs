//! Shared application state handed to every handler.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, db::DbPool, services::LedgerService};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub ledger: LedgerService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: DbPool, ledger: LedgerService, config: Config) -> Self {
        Self {
            pool,
            ledger,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for LedgerService {
    fn from_ref(state: &AppState) -> Self {
        state.ledger.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
