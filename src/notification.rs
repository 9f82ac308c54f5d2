//! Post-transfer notifications
//!
//! Delivery is fire-and-forget: it runs only after a transfer committed and
//! has no way to report failure back into the transfer.

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tracing::info;

use crate::account::Account;

/// Sink for messages addressed to an account holder
pub trait TransferNotifier: Send + Sync {
    fn notify_about_transfer(&self, account: &Account, message: &str);
}

/// Notifier that writes each notice to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl TransferNotifier for LogNotifier {
    fn notify_about_transfer(&self, account: &Account, message: &str) {
        info!(account_id = account.id(), "Sending notification: {}", message);
    }
}

/// Confirmation text sent to both parties of a transfer
pub fn transfer_message(from: &str, to: &str, amount: Decimal, at: DateTime<Local>) -> String {
    format!(
        "Amount transfer of {} from {} to {} account has been successfully completed on {}",
        amount,
        from,
        to,
        at.format("%m-%d-%Y %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_message_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let msg = transfer_message("1001", "1002", dec!(10.50), at);
        assert_eq!(
            msg,
            "Amount transfer of 10.50 from 1001 to 1002 account has been successfully completed on 03-07-2024 09:05:01"
        );
    }
}
