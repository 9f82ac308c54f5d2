//! Transfer handler

use std::sync::Arc;

use axum::extract::State;
use chrono::Local;

use super::super::state::AppState;
use super::super::types::{ApiResult, TransferView, ValidTransfer, ok};
use crate::notification::transfer_message;

/// POST /v1/accounts/amount/transfer
///
/// Notifies both parties only after the coordinator reported success.
pub async fn transfer_amount(
    State(state): State<Arc<AppState>>,
    ValidTransfer(req): ValidTransfer,
) -> ApiResult<TransferView> {
    let receipt = state.coordinator.transfer(&req.from, &req.to, req.amount)?;

    let message = transfer_message(&req.from, &req.to, receipt.amount, Local::now());
    state.notifier.notify_about_transfer(&receipt.from, &message);
    state.notifier.notify_about_transfer(&receipt.to, &message);

    ok(TransferView {
        account_from_id: req.from,
        account_to_id: req.to,
        amount: receipt.amount.to_string(),
        message,
    })
}
