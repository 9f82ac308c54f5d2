//! Transfer Error Types

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountError;

/// Transfer error types
///
/// All variants are expected outcomes reported to the caller. A broken
/// conservation invariant is not represented here: it aborts the transfer
/// with a panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Source and target account cannot be the same: {0}")]
    SameAccount(String),

    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// Failure reported by the account store for one leg of the transfer
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::SameAccount(_) => "SAME_ACCOUNT",
            TransferError::InvalidAmount(_) => "INVALID_AMOUNT",
            TransferError::Account(e) => e.code(),
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::SameAccount(_) | TransferError::InvalidAmount(_) => 400,
            TransferError::Account(e) => e.http_status(),
        }
    }
}
