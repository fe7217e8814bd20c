//! Withdrawal approval workflow
//!
//! Two-party state machine layered on the ledger: an admin-tier requester
//! proposes debiting a target account in the requester's favor, and only
//! the target may authorize the movement of funds. Pending requests expire
//! lazily after a fixed window.

pub mod models;
pub mod service;

pub use models::{WithdrawalRequest, WithdrawalStatus};
pub use service::{WithdrawalService, run_sweeper};
