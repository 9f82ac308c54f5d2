//! Account snapshot type

use rust_decimal::Decimal;
use serde::Serialize;

/// Point-in-time copy of an account.
///
/// Handed out by [`AccountStore::get`](super::AccountStore::get) and inside
/// transfer receipts. It is a plain value: changing it never touches the
/// balance held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: String,
    balance: Decimal,
}

impl Account {
    pub(crate) fn new(id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }

    /// Account identifier (case-sensitive)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Balance at the moment the snapshot was taken
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_is_detached_copy() {
        let original = Account::new("1001", dec!(10.50));
        let mut copy = original.clone();
        copy.balance = dec!(0);

        assert_eq!(original.balance(), dec!(10.50));
        assert_eq!(copy.id(), "1001");
    }
}
