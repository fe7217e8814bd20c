//! Account management module
//!
//! PostgreSQL-backed storage for the tiered account hierarchy. Balances are
//! only ever mutated through the ledger engine; this module owns the rows.

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::{Account, Role, can_manage};
pub use repository::AccountRepository;

// Re-export Database from top-level db module
pub use crate::db::Database;
