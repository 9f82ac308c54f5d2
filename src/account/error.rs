//! Account store error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors reported by [`AccountStore`](super::AccountStore) operations.
///
/// Every variant is an expected, caller-recoverable outcome; none of them is
/// retried inside the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account id {0} not exists!")]
    NotFound(String),

    #[error("Account id {0} already exists!")]
    Duplicate(String),

    #[error("Account id {0} has insufficient balance!")]
    InsufficientBalance(String),

    #[error("Invalid amount {amount} for account id {id}")]
    InvalidAmount { id: String, amount: Decimal },
}

impl AccountError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::NotFound(_) => "ACCOUNT_NOT_FOUND",
            AccountError::Duplicate(_) => "DUPLICATE_ACCOUNT",
            AccountError::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            AccountError::InvalidAmount { .. } => "INVALID_AMOUNT",
        }
    }

    /// HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            AccountError::NotFound(_) => 404,
            AccountError::Duplicate(_)
            | AccountError::InsufficientBalance(_)
            | AccountError::InvalidAmount { .. } => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AccountError::NotFound("a".into()).code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(AccountError::Duplicate("a".into()).code(), "DUPLICATE_ACCOUNT");
        assert_eq!(
            AccountError::InsufficientBalance("a".into()).code(),
            "INSUFFICIENT_BALANCE"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(AccountError::NotFound("a".into()).http_status(), 404);
        assert_eq!(AccountError::Duplicate("a".into()).http_status(), 400);
        assert_eq!(
            AccountError::InsufficientBalance("a".into()).http_status(),
            400
        );
    }

    #[test]
    fn test_display_names_the_account() {
        let err = AccountError::NotFound("1002".into());
        assert_eq!(err.to_string(), "Account id 1002 not exists!");

        let err = AccountError::InvalidAmount {
            id: "1001".into(),
            amount: Decimal::NEGATIVE_ONE,
        };
        assert!(err.to_string().contains("1001"));
    }
}
