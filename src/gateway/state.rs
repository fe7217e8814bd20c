use std::sync::Arc;

use crate::account::Database;
use crate::auth::AuthService;
use crate::ledger::LedgerEngine;
use crate::websocket::ConnectionRegistry;
use crate::withdrawal::WithdrawalService;

/// Shared gateway application state
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub ledger: LedgerEngine,
    pub withdrawals: WithdrawalService,
    /// Live push channels; injected (never global) so test instances and
    /// multiple processes stay isolated
    pub registry: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>, withdrawal_expiry_secs: i64) -> Self {
        Self {
            ledger: LedgerEngine::new(db.clone()),
            withdrawals: WithdrawalService::new(db.clone(), withdrawal_expiry_secs),
            registry: Arc::new(ConnectionRegistry::new()),
            db,
            auth,
        }
    }
}
