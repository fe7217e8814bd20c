//! Wallet error taxonomy
//!
//! Every ledger/workflow failure surfaces as one of these typed variants
//! with a stable wire code. Store faults collapse into `Unexpected`; the
//! caller never sees a raw driver error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    // === Validation errors (no store mutation attempted) ===
    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Operation cannot target this account")]
    InvalidTarget,

    #[error("Invalid stake")]
    InvalidStake,

    // === State errors ===
    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Withdrawal request has expired")]
    RequestExpired,

    #[error("Withdrawal request not found")]
    RequestNotFound,

    // === Authorization errors ===
    #[error("Caller is not authorized for this operation")]
    NotAuthorized,

    #[error("Account is disabled")]
    AccountInactive,

    // === Not-found errors ===
    #[error("User not found")]
    UserNotFound,

    // === System errors (rolled back, details logged only) ===
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl WalletError {
    /// Get the stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::InvalidAmount => "INVALID_AMOUNT",
            WalletError::InvalidTarget => "INVALID_TARGET",
            WalletError::InvalidStake => "INVALID_STAKE",
            WalletError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            WalletError::RequestExpired => "REQUEST_EXPIRED",
            WalletError::RequestNotFound => "REQUEST_NOT_FOUND",
            WalletError::NotAuthorized => "NOT_AUTHORIZED",
            WalletError::AccountInactive => "ACCOUNT_INACTIVE",
            WalletError::UserNotFound => "USER_NOT_FOUND",
            WalletError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            WalletError::InvalidAmount
            | WalletError::InvalidTarget
            | WalletError::InvalidStake => 400,
            WalletError::InsufficientBalance
            | WalletError::RequestExpired
            | WalletError::AccountInactive => 422,
            WalletError::NotAuthorized => 403,
            WalletError::RequestNotFound | WalletError::UserNotFound => 404,
            WalletError::Unexpected(_) => 500,
        }
    }
}

impl From<sqlx::Error> for WalletError {
    fn from(e: sqlx::Error) -> Self {
        WalletError::Unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WalletError::InvalidAmount.code(), "INVALID_AMOUNT");
        assert_eq!(
            WalletError::InsufficientBalance.code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(WalletError::RequestExpired.code(), "REQUEST_EXPIRED");
        assert_eq!(WalletError::Unexpected("x".into()).code(), "UNEXPECTED_ERROR");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(WalletError::InvalidAmount.http_status(), 400);
        assert_eq!(WalletError::InsufficientBalance.http_status(), 422);
        assert_eq!(WalletError::NotAuthorized.http_status(), 403);
        assert_eq!(WalletError::UserNotFound.http_status(), 404);
        assert_eq!(WalletError::RequestNotFound.http_status(), 404);
        assert_eq!(WalletError::Unexpected("boom".into()).http_status(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            WalletError::InsufficientBalance.to_string(),
            "Insufficient balance"
        );
    }

    #[test]
    fn test_sqlx_error_maps_to_unexpected() {
        let err: WalletError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code(), "UNEXPECTED_ERROR");
    }
}
