//! Withdrawal request state machine definitions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Withdrawal request states
///
/// State IDs are designed for PostgreSQL storage as SMALLINT.
/// Terminal states: APPROVED (1), REJECTED (2), EXPIRED (3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum WithdrawalStatus {
    /// Awaiting the target's decision
    Pending = 0,

    /// Terminal: target authorized the debit, funds moved
    Approved = 1,

    /// Terminal: target declined, no funds moved
    Rejected = 2,

    /// Terminal: expiry window elapsed before a decision
    Expired = 3,
}

impl WithdrawalStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WithdrawalStatus::Pending)
    }

    /// Get the numeric state ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from PostgreSQL state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(WithdrawalStatus::Pending),
            1 => Some(WithdrawalStatus::Approved),
            2 => Some(WithdrawalStatus::Rejected),
            3 => Some(WithdrawalStatus::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
            WithdrawalStatus::Rejected => "rejected",
            WithdrawalStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A withdrawal request.
///
/// `requester_id` receives the funds; `target_user_id` is debited and is
/// the only account that may approve or reject. `approved_by`/`approved_at`
/// record whoever settled the request, including rejections.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalRequest {
    pub request_id: Uuid,
    pub requester_id: i64,
    pub target_user_id: i64,
    pub amount: Decimal,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl WithdrawalRequest {
    /// Derived lazy-expiry check: overdue pending requests are treated as
    /// expired whenever they are next touched, sweep or no sweep.
    pub fn is_overdue(&self, now: DateTime<Utc>, window_secs: i64) -> bool {
        self.status == WithdrawalStatus::Pending
            && now - self.created_at > chrono::Duration::seconds(window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: WithdrawalStatus, age_secs: i64) -> WithdrawalRequest {
        WithdrawalRequest {
            request_id: Uuid::new_v4(),
            requester_id: 1,
            target_user_id: 2,
            amount: Decimal::new(1500, 2),
            status,
            created_at: Utc::now() - chrono::Duration::seconds(age_secs),
            approved_by: None,
            approved_at: None,
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!WithdrawalStatus::Pending.is_terminal());
        assert!(WithdrawalStatus::Approved.is_terminal());
        assert!(WithdrawalStatus::Rejected.is_terminal());
        assert!(WithdrawalStatus::Expired.is_terminal());
    }

    #[test]
    fn test_status_id_roundtrip() {
        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Approved,
            WithdrawalStatus::Rejected,
            WithdrawalStatus::Expired,
        ] {
            assert_eq!(WithdrawalStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(WithdrawalStatus::from_id(99), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WithdrawalStatus::Pending.to_string(), "pending");
        assert_eq!(WithdrawalStatus::Expired.to_string(), "expired");
    }

    #[test]
    fn test_overdue_is_derived_from_age_and_status() {
        let now = Utc::now();
        assert!(!request(WithdrawalStatus::Pending, 10).is_overdue(now, 3600));
        assert!(request(WithdrawalStatus::Pending, 3700).is_overdue(now, 3600));
        // Terminal requests are never "overdue", they are already settled
        assert!(!request(WithdrawalStatus::Approved, 3700).is_overdue(now, 3600));
        assert!(!request(WithdrawalStatus::Rejected, 3700).is_overdue(now, 3600));
    }
}
