//! Gateway types module
//!
//! ## Input Types
//! - [`AmountInput`]: Format-validated decimal for API input
//! - [`CreateAccountRequest`], [`TransferRequest`]: request bodies
//! - [`ValidCreate`], [`ValidTransfer`]: Axum extractors that validate at the boundary
//!
//! ## Output Types
//! - [`AccountView`], [`TransferView`]: response payloads
//! - [`ApiResponse<T>`]: Unified API response wrapper

pub mod account;
pub mod extract;
pub mod money;
pub mod response;

pub use account::{
    AccountView, CreateAccountRequest, TransferRequest, TransferView, ValidatedCreate,
    ValidatedTransfer,
};
pub use extract::{ValidCreate, ValidTransfer};
pub use money::AmountInput;
pub use response::{ApiError, ApiResponse, ApiResult, error_codes, ok, ok_with};
