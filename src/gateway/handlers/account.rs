//! Account handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::super::state::AppState;
use super::super::types::{AccountView, ApiResult, ValidCreate, ok, ok_with};

/// POST /v1/accounts
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ValidCreate(req): ValidCreate,
) -> ApiResult<AccountView> {
    let account = state.store.create(&req.account_id, req.balance)?;
    ok_with(StatusCode::CREATED, AccountView::from(&account))
}

/// GET /v1/accounts/{account_id}
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> ApiResult<AccountView> {
    let account = state.store.get(&account_id)?;
    ok(AccountView::from(&account))
}
