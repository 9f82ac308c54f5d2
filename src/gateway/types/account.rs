//! Account and transfer request/response DTOs
//!
//! Request fields are `Option` so that a missing field is reported as a
//! parameter error with the field name, not as a generic JSON failure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::AmountInput;
use super::response::ApiError;
use crate::account::Account;

/// POST /v1/accounts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_id: Option<String>,
    pub balance: Option<AmountInput>,
}

/// POST /v1/accounts/amount/transfer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub account_from_id: Option<String>,
    pub account_to_id: Option<String>,
    pub amount: Option<AmountInput>,
}

/// Create request after boundary validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreate {
    pub account_id: String,
    pub balance: Decimal,
}

/// Transfer request after boundary validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransfer {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

fn require_id(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ApiError::bad_request(format!("{} must not be empty", field))),
    }
}

impl CreateAccountRequest {
    pub fn validate(self) -> Result<ValidatedCreate, ApiError> {
        let account_id = require_id(self.account_id, "accountId")?;
        let balance = self
            .balance
            .ok_or_else(|| ApiError::bad_request("balance is required"))?
            .inner();
        if balance < Decimal::ZERO {
            return Err(ApiError::invalid_amount(format!(
                "Initial balance must be positive: {}",
                balance
            )));
        }
        Ok(ValidatedCreate {
            account_id,
            balance,
        })
    }
}

impl TransferRequest {
    pub fn validate(self) -> Result<ValidatedTransfer, ApiError> {
        let from = require_id(self.account_from_id, "accountFromId")?;
        let to = require_id(self.account_to_id, "accountToId")?;
        let amount = self
            .amount
            .ok_or_else(|| ApiError::bad_request("amount is required"))?
            .inner();
        if amount <= Decimal::ZERO {
            return Err(ApiError::invalid_amount(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }
        Ok(ValidatedTransfer { from, to, amount })
    }
}

/// Account as returned by the API. Balance is a string to keep precision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub account_id: String,
    pub balance: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id().to_string(),
            balance: account.balance().to_string(),
        }
    }
}

/// Transfer confirmation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferView {
    pub account_from_id: String,
    pub account_to_id: String,
    pub amount: String,
    pub message: String,
}
