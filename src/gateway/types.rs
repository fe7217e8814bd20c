//! Gateway API types
//!
//! - [`StrictDecimal`]: format-validated amount at the Serde layer
//! - [`ApiResponse<T>`]: unified response wrapper
//! - [`ApiError`]: typed failure carrying HTTP status + stable code

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::WalletError;

// ============================================================================
// StrictDecimal: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format Decimal - validates format during deserialization
///
/// - Rejects `.5` (must be `0.5`)
/// - Rejects `5.` (must be `5.0` or `5`)
/// - Rejects negative numbers
/// - Rejects empty strings
///
/// Business validation (positivity, sufficiency) happens in the engine.
#[derive(Debug, Clone, Copy)]
pub struct StrictDecimal(Decimal);

impl StrictDecimal {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl std::ops::Deref for StrictDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StrictDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Support both JSON number and JSON string
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(Decimal),
        }

        let value = DecimalOrString::deserialize(deserializer)?;

        match value {
            DecimalOrString::String(s) => {
                if s.is_empty() {
                    return Err(D::Error::custom("Amount cannot be empty"));
                }
                if s.starts_with('.') {
                    return Err(D::Error::custom("Invalid format: use 0.5 not .5"));
                }
                if s.ends_with('.') {
                    return Err(D::Error::custom("Invalid format: use 5.0 not 5."));
                }

                let d = Decimal::from_str(&s)
                    .map_err(|e| D::Error::custom(format!("Invalid decimal: {}", e)))?;

                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }

                Ok(StrictDecimal(d))
            }
            DecimalOrString::Number(d) => {
                if d.is_sign_negative() {
                    return Err(D::Error::custom("Amount cannot be negative"));
                }
                Ok(StrictDecimal(d))
            }
        }
    }
}

impl Serialize for StrictDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const NOT_AUTHORIZED: i32 = 2003;
    pub const ACCOUNT_DISABLED: i32 = 2004;

    // Resource errors (4xxx)
    pub const USER_NOT_FOUND: i32 = 4001;
    pub const REQUEST_NOT_FOUND: i32 = 4002;
    pub const REQUEST_EXPIRED: i32 = 4003;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// ApiError / ApiResult
// ============================================================================

/// Typed handler failure; renders as the unified envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        let code = match &e {
            WalletError::InvalidAmount
            | WalletError::InvalidTarget
            | WalletError::InvalidStake => error_codes::INVALID_PARAMETER,
            WalletError::InsufficientBalance => error_codes::INSUFFICIENT_BALANCE,
            WalletError::RequestExpired => error_codes::REQUEST_EXPIRED,
            WalletError::RequestNotFound => error_codes::REQUEST_NOT_FOUND,
            WalletError::NotAuthorized => error_codes::NOT_AUTHORIZED,
            WalletError::AccountInactive => error_codes::ACCOUNT_DISABLED,
            WalletError::UserNotFound => error_codes::USER_NOT_FOUND,
            WalletError::Unexpected(_) => error_codes::INTERNAL_ERROR,
        };
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Store faults stay in the logs; the caller gets a stable envelope
        if let WalletError::Unexpected(detail) = &e {
            tracing::error!(detail = %detail, "wallet operation failed unexpectedly");
            return Self::new(status, code, "Internal error");
        }

        Self::new(status, code, e.to_string())
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Create success result
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // StrictDecimal Tests
    // =========================================================================

    #[test]
    fn test_strict_decimal_valid_string() {
        let d: StrictDecimal = serde_json::from_str(r#""1.5""#).unwrap();
        assert_eq!(*d, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_strict_decimal_valid_number() {
        let d: StrictDecimal = serde_json::from_str("1.5").unwrap();
        assert_eq!(*d, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_strict_decimal_rejects_dot_prefix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#"".5""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_dot_suffix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""5.""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_negative() {
        assert!(serde_json::from_str::<StrictDecimal>(r#""-1.5""#).is_err());
        assert!(serde_json::from_str::<StrictDecimal>("-1.5").is_err());
    }

    #[test]
    fn test_strict_decimal_rejects_empty() {
        assert!(serde_json::from_str::<StrictDecimal>(r#""""#).is_err());
    }

    // =========================================================================
    // Error mapping tests
    // =========================================================================

    #[test]
    fn test_wallet_error_mapping() {
        let e: ApiError = WalletError::InsufficientBalance.into();
        assert_eq!(e.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(e.code, error_codes::INSUFFICIENT_BALANCE);

        let e: ApiError = WalletError::NotAuthorized.into();
        assert_eq!(e.status, StatusCode::FORBIDDEN);
        assert_eq!(e.code, error_codes::NOT_AUTHORIZED);

        let e: ApiError = WalletError::RequestNotFound.into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.code, error_codes::REQUEST_NOT_FOUND);
    }

    #[test]
    fn test_unexpected_error_is_not_leaked() {
        let e: ApiError = WalletError::Unexpected("connection refused at 10.0.0.3".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.msg, "Internal error");
    }

    #[test]
    fn test_api_response_shapes() {
        let success = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(success["code"], 0);
        assert_eq!(success["data"], 7);

        let failure =
            serde_json::to_value(ApiResponse::<()>::error(error_codes::AUTH_FAILED, "nope"))
                .unwrap();
        assert_eq!(failure["code"], 2002);
        assert!(failure.get("data").is_none());
    }
}
