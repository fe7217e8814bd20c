//! Ledger transaction records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Transaction kind
///
/// Kind IDs are designed for PostgreSQL storage as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum TxKind {
    /// Peer transfer: sender debited (unless unlimited), receiver credited
    Transfer = 1,
    /// Administrative issuance: receiver credited, nothing debited
    Credit = 2,
    /// Administrative destruction or approved withdrawal: sender debited
    Debit = 3,
}

impl TxKind {
    /// Convert from PostgreSQL kind ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TxKind::Transfer),
            2 => Some(TxKind::Credit),
            3 => Some(TxKind::Debit),
            _ => None,
        }
    }

    /// Get the numeric kind ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Transfer => "transfer",
            TxKind::Credit => "credit",
            TxKind::Debit => "debit",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable record of one committed ledger mutation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub tx_id: i64,
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub amount: Decimal,
    pub kind: TxKind,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id_roundtrip() {
        for kind in [TxKind::Transfer, TxKind::Credit, TxKind::Debit] {
            assert_eq!(TxKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(TxKind::from_id(0), None);
        assert_eq!(TxKind::from_id(9), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TxKind::Transfer.to_string(), "transfer");
        assert_eq!(TxKind::Debit.to_string(), "debit");
    }

    #[test]
    fn test_transaction_serializes_kind_as_name() {
        let record = Transaction {
            tx_id: 1,
            sender_id: Some(10),
            receiver_id: Some(20),
            amount: Decimal::new(100, 2),
            kind: TxKind::Credit,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "credit");
    }
}
