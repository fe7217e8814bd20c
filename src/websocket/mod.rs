//! WebSocket module for real-time push notifications
//!
//! Balance, transaction and withdrawal events are pushed best-effort to
//! whichever connections currently represent an account. The registry is
//! process-local and never a source of truth; clients reconcile against
//! the store on reconnect.

pub mod connection;
pub mod handler;

pub use connection::ConnectionRegistry;
pub use handler::ws_handler;
