//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError`: Error response carrying HTTP status and business code
//! - `error_codes`: Standard error code constants

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::account::AccountError;
use crate::transfer::TransferError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const INVALID_AMOUNT: i32 = 1003;
    pub const SAME_ACCOUNT: i32 = 1004;
    pub const DUPLICATE_ACCOUNT: i32 = 1005;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4004;
}

// ============================================================================
// ApiError
// ============================================================================

/// Error returned from handlers, rendered as `ApiResponse<()>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

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

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_AMOUNT, msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        let code = match e {
            AccountError::NotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
            AccountError::Duplicate(_) => error_codes::DUPLICATE_ACCOUNT,
            AccountError::InsufficientBalance(_) => error_codes::INSUFFICIENT_BALANCE,
            AccountError::InvalidAmount { .. } => error_codes::INVALID_AMOUNT,
        };
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, code, e.to_string())
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::Account(inner) => inner.into(),
            TransferError::SameAccount(_) => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::SAME_ACCOUNT, e.to_string())
            }
            TransferError::InvalidAmount(_) => Self::invalid_amount(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Wrap data in a success envelope with the given status
pub fn ok_with<T>(status: StatusCode, data: T) -> ApiResult<T> {
    Ok((status, Json(ApiResponse::success(data))))
}

/// Wrap data in a 200 success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    ok_with(StatusCode::OK, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_success_serialization() {
        let json = serde_json::to_string(&ApiResponse::success(7)).unwrap();
        assert_eq!(json, r#"{"code":0,"msg":"ok","data":7}"#);
    }

    #[test]
    fn test_error_omits_data() {
        let json = serde_json::to_string(&ApiResponse::<()>::error(1001, "bad")).unwrap();
        assert_eq!(json, r#"{"code":1001,"msg":"bad"}"#);
    }

    #[test]
    fn test_account_error_mapping() {
        let err = ApiError::from(AccountError::NotFound("1002".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::ACCOUNT_NOT_FOUND);
        assert!(err.msg.contains("1002"));

        let err = ApiError::from(AccountError::Duplicate("1001".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::DUPLICATE_ACCOUNT);
    }

    #[test]
    fn test_transfer_error_mapping() {
        let err = ApiError::from(TransferError::SameAccount("1001".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::SAME_ACCOUNT);

        let err = ApiError::from(TransferError::InvalidAmount(Decimal::ZERO));
        assert_eq!(err.code, error_codes::INVALID_AMOUNT);

        let err = ApiError::from(TransferError::from(AccountError::InsufficientBalance(
            "1001".into(),
        )));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INSUFFICIENT_BALANCE);
    }
}
