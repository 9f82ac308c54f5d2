//! Validating extractors
//!
//! Handlers only ever see requests that passed boundary validation. Both
//! JSON rejections and validation failures render as `ApiError`.

use axum::{
    Json,
    extract::{FromRequest, Request},
};

use super::account::{CreateAccountRequest, TransferRequest, ValidatedCreate, ValidatedTransfer};
use super::response::ApiError;

/// Extracts and validates a `CreateAccountRequest`
#[derive(Debug)]
pub struct ValidCreate(pub ValidatedCreate);

/// Extracts and validates a `TransferRequest`
#[derive(Debug)]
pub struct ValidTransfer(pub ValidatedTransfer);

impl<S> FromRequest<S> for ValidCreate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body): Json<CreateAccountRequest> = Json::from_request(req, state).await?;
        Ok(ValidCreate(body.validate()?))
    }
}

impl<S> FromRequest<S> for ValidTransfer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body): Json<TransferRequest> = Json::from_request(req, state).await?;
        Ok(ValidTransfer(body.validate()?))
    }
}
