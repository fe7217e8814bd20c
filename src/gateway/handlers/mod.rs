//! Gateway request handlers

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;
pub mod wallet;
pub mod withdrawals;

pub use admin::{credit, debit};
pub use auth::{change_password, login};
pub use health::{HealthResponse, health_check};
pub use users::{create_user, disable_user, list_users, restore_user};
pub use wallet::{create_transfer, get_balance, get_transactions};
pub use withdrawals::{
    approve_withdrawal, create_withdrawal, list_incoming, list_sent, reject_withdrawal,
};
