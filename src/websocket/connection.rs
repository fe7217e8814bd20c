//! WebSocket connection registry
//!
//! Maps an account id to its live connections using DashMap for concurrent
//! access. An account may hold several connections at once (mobile + web).
//! The registry is owned by the server state and injected where needed, so
//! test instances stay isolated from each other.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use crate::messages::{Notice, WsEvent};

/// Per-connection sender half
pub type WsSender = mpsc::UnboundedSender<WsEvent>;

/// Unique connection identifier
pub type ConnectionId = u64;

/// Thread-safe registry of live push channels.
///
/// Never persisted and never authoritative: an account without an entry
/// simply misses the push and reconciles by polling.
pub struct ConnectionRegistry {
    /// account_id -> list of (connection_id, sender)
    connections: DashMap<i64, Vec<(ConnectionId, WsSender)>>,
    /// Next connection ID
    next_conn_id: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_conn_id: AtomicU64::new(1),
        }
    }

    /// Add a connection for an account after its handshake authenticated.
    ///
    /// Returns the unique connection ID for this connection.
    pub fn register(&self, account_id: i64, tx: WsSender) -> ConnectionId {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);

        self.connections
            .entry(account_id)
            .or_default()
            .push((conn_id, tx));

        tracing::info!(
            account_id,
            conn_id,
            total_connections = self
                .connections
                .get(&account_id)
                .map(|v| v.len())
                .unwrap_or(0),
            "WebSocket connection registered"
        );

        conn_id
    }

    /// Remove a connection by ID; the account's entry is deleted once empty.
    pub fn unregister(&self, account_id: i64, conn_id: ConnectionId) {
        if let Some(mut senders) = self.connections.get_mut(&account_id) {
            senders.retain(|(id, _)| *id != conn_id);

            if senders.is_empty() {
                drop(senders); // Release the shard lock before removal
                self.connections.remove(&account_id);
                tracing::info!(account_id, conn_id, "All WebSocket connections closed");
            } else {
                tracing::info!(
                    account_id,
                    conn_id,
                    remaining_connections = senders.len(),
                    "WebSocket connection removed"
                );
            }
        }
    }

    /// Push an event to every live connection of one account.
    ///
    /// Silent no-op when the account has no entry; closed channels are
    /// skipped (their removal happens when the socket task winds down).
    pub fn publish(&self, account_id: i64, event: WsEvent) {
        if let Some(senders) = self.connections.get(&account_id) {
            for (_, tx) in senders.iter() {
                if tx.send(event.clone()).is_err() {
                    tracing::warn!(account_id, "Failed to push - client disconnected");
                }
            }
            tracing::debug!(
                account_id,
                recipients = senders.len(),
                "event pushed to account"
            );
        }
    }

    /// Push one event to every registered account. Platform-wide notices
    /// only; ledger/workflow paths address accounts individually.
    pub fn publish_all(&self, event: WsEvent) {
        for entry in self.connections.iter() {
            for (_, tx) in entry.value().iter() {
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Dispatch a post-commit effects list. Push failures are already
    /// swallowed per connection, so a committed operation can never be
    /// reported as failed because a client was unreachable.
    pub fn dispatch(&self, notices: Vec<Notice>) {
        for notice in notices {
            self.publish(notice.account_id, notice.event);
        }
    }

    /// Get connection statistics
    ///
    /// Returns (number of accounts, total connections)
    pub fn stats(&self) -> (usize, usize) {
        let accounts = self.connections.len();
        let total_connections: usize = self
            .connections
            .iter()
            .map(|entry| entry.value().len())
            .sum();
        (accounts, total_connections)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Notice;

    #[test]
    fn test_register_unregister() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let conn_id = registry.register(1001, tx);
        assert_eq!(registry.stats(), (1, 1));

        registry.unregister(1001, conn_id);
        assert_eq!(registry.stats(), (0, 0));
    }

    #[test]
    fn test_multiple_connections_per_account() {
        let registry = ConnectionRegistry::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        let conn_id1 = registry.register(1001, tx1);
        let conn_id2 = registry.register(1001, tx2);
        assert_eq!(registry.stats(), (1, 2));

        registry.unregister(1001, conn_id1);
        assert_eq!(registry.stats(), (1, 1));

        registry.unregister(1001, conn_id2);
        assert_eq!(registry.stats(), (0, 0));
    }

    #[test]
    fn test_publish_reaches_every_connection() {
        let registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        registry.register(1001, tx1);
        registry.register(1001, tx2);

        registry.publish(1001, WsEvent::UsersUpdate {});

        assert!(matches!(rx1.try_recv().unwrap(), WsEvent::UsersUpdate {}));
        assert!(matches!(rx2.try_recv().unwrap(), WsEvent::UsersUpdate {}));
    }

    #[test]
    fn test_publish_without_entry_is_a_noop() {
        let registry = ConnectionRegistry::new();
        // Must not panic and must not create an entry
        registry.publish(9999, WsEvent::PasswordChanged {});
        assert_eq!(registry.stats(), (0, 0));
    }

    #[test]
    fn test_publish_all() {
        let registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        registry.register(1, tx1);
        registry.register(2, tx2);

        registry.publish_all(WsEvent::AccountDisabled {});

        assert!(matches!(rx1.try_recv().unwrap(), WsEvent::AccountDisabled {}));
        assert!(matches!(rx2.try_recv().unwrap(), WsEvent::AccountDisabled {}));
    }

    #[test]
    fn test_dispatch_routes_each_notice() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(5, tx);

        registry.dispatch(vec![
            Notice::new(5, WsEvent::UsersUpdate {}),
            // Unreachable account: swallowed
            Notice::new(6, WsEvent::UsersUpdate {}),
            Notice::new(5, WsEvent::PasswordChanged {}),
        ]);

        assert!(matches!(rx.try_recv().unwrap(), WsEvent::UsersUpdate {}));
        assert!(matches!(rx.try_recv().unwrap(), WsEvent::PasswordChanged {}));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_sender_does_not_break_publish() {
        let registry = ConnectionRegistry::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();

        registry.register(7, tx_dead);
        registry.register(7, tx_live);
        drop(rx_dead);

        registry.publish(7, WsEvent::Pong);
        assert!(matches!(rx_live.try_recv().unwrap(), WsEvent::Pong));
    }
}
