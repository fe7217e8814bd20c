//! Messages - client-facing push payloads and the post-commit effects list
//!
//! Ledger and withdrawal operations return a `Vec<Notice>` describing who
//! should be pushed what. The gateway dispatches the list through the
//! connection registry strictly after the SQL transaction commits, so the
//! store is always durable before any client hears about a change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::Transaction;
use crate::withdrawal::WithdrawalRequest;

/// Server -> client push event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    /// Handshake acknowledgement
    Connected { account_id: i64 },
    Pong,
    Error { message: String },
    /// Authoritative new balance for the receiving account
    BalanceUpdate { balance: Decimal },
    /// A committed ledger transaction the account took part in
    Transaction { data: Transaction },
    /// Hint: re-fetch the managed-user list
    UsersUpdate {},
    WithdrawalRequest { request: WithdrawalRequest },
    WithdrawalApproved { request_id: Uuid },
    WithdrawalRejected { request_id: Uuid },
    /// Force client-side session teardown
    AccountDisabled {},
    PasswordChanged {},
}

/// Client -> server frame (handshake + keepalive)
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Auth { token: String },
    Ping,
}

/// One element of the effects list: push `event` to `account_id`
#[derive(Debug, Clone)]
pub struct Notice {
    pub account_id: i64,
    pub event: WsEvent,
}

impl Notice {
    pub fn new(account_id: i64, event: WsEvent) -> Self {
        Self { account_id, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TxKind;
    use crate::withdrawal::WithdrawalStatus;
    use chrono::Utc;

    #[test]
    fn test_event_tags_are_snake_case() {
        let json = serde_json::to_string(&WsEvent::UsersUpdate {}).unwrap();
        assert_eq!(json, r#"{"type":"users_update"}"#);

        let json = serde_json::to_string(&WsEvent::AccountDisabled {}).unwrap();
        assert_eq!(json, r#"{"type":"account_disabled"}"#);

        let json = serde_json::to_string(&WsEvent::BalanceUpdate {
            balance: Decimal::new(7000, 2),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"balance_update","balance":"70.00"}"#);
    }

    #[test]
    fn test_transaction_event_shape() {
        let event = WsEvent::Transaction {
            data: Transaction {
                tx_id: 9,
                sender_id: Some(1),
                receiver_id: Some(2),
                amount: Decimal::new(3000, 2),
                kind: TxKind::Transfer,
                created_at: Utc::now(),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "transaction");
        assert_eq!(json["data"]["kind"], "transfer");
        assert_eq!(json["data"]["amount"], "30.00");
    }

    #[test]
    fn test_withdrawal_request_event_shape() {
        let request = WithdrawalRequest {
            request_id: Uuid::new_v4(),
            requester_id: 3,
            target_user_id: 4,
            amount: Decimal::new(1500, 2),
            status: WithdrawalStatus::Pending,
            created_at: Utc::now(),
            approved_by: None,
            approved_at: None,
        };
        let json = serde_json::to_value(&WsEvent::WithdrawalRequest { request }).unwrap();
        assert_eq!(json["type"], "withdrawal_request");
        assert_eq!(json["request"]["status"], "pending");
    }

    #[test]
    fn test_client_frame_parsing() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"auth","token":"abc"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Auth { token } if token == "abc"));

        let frame: ClientFrame = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Ping));

        let bad: Result<ClientFrame, _> = serde_json::from_str(r#"{"type":"order"}"#);
        assert!(bad.is_err());
    }
}
