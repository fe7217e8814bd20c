//! Tiered Wallet - shared-balance wallet service
//!
//! A multi-tier user hierarchy (super_admin -> admin -> sub_admin -> user)
//! sharing one currency, with a two-party withdrawal approval protocol and
//! realtime WebSocket push of ledger events.
//!
//! # Modules
//!
//! - [`account`] - Account rows, roles, hierarchy authority rule
//! - [`ledger`] - Atomic balance mutations (transfer/credit/debit)
//! - [`withdrawal`] - Request/approve/reject/expire state machine
//! - [`websocket`] - Connection registry and best-effort push bus
//! - [`auth`] - JWT session validation and credentials
//! - [`gateway`] - Axum HTTP surface
//! - [`messages`] - Push payloads and the post-commit effects list
//! - [`error`] - The wallet error taxonomy

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod messages;
pub mod websocket;
pub mod withdrawal;

// Convenient re-exports at crate root
pub use account::{Account, Role};
pub use db::Database;
pub use error::WalletError;
pub use ledger::{LedgerEngine, LedgerOutcome, Transaction, TxKind};
pub use messages::{Notice, WsEvent};
pub use websocket::ConnectionRegistry;
pub use withdrawal::{WithdrawalRequest, WithdrawalService, WithdrawalStatus};
