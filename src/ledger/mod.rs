//! Balance ledger engine
//!
//! Atomic, concurrency-safe mutation of account balances. Every successful
//! operation writes exactly one transaction row in the same SQL transaction
//! as the balance change(s) and returns the push effects the caller should
//! dispatch after commit.

pub mod engine;
pub mod models;
pub mod repository;

pub use engine::{LedgerEngine, LedgerOutcome};
pub use models::{Transaction, TxKind};
pub use repository::TransactionRepository;
