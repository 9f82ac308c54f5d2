//! Transfer Coordinator
//!
//! Moves an amount between two accounts as one all-or-nothing step.
//!
//! # Protocol
//!
//! ```text
//! validate ─▶ lock(min id) ─▶ lock(max id) ─▶ debit(from) ─▶ credit(to) ─▶ unlock(max) ─▶ unlock(min)
//!                                                 │              │
//!                                               fail        fail ─▶ credit(from) (compensate)
//! ```
//!
//! Locks are always taken in lexicographic id order, whatever the transfer
//! direction, so two transfers over the same pair can never wait on each
//! other in a cycle.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::error::TransferError;
use crate::account::{Account, AccountError, AccountSlot, AccountStore, HeldAccount, Ledger};

/// Compensation attempts after the first failed one
pub const DEFAULT_COMPENSATION_RETRIES: u32 = 3;

/// Balances of both accounts right after a committed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub from: Account,
    pub to: Account,
    pub amount: Decimal,
}

/// Both account locks of one transfer.
///
/// `second` is declared before `first` so that the implicit drop releases
/// them in reverse acquisition order on every exit path.
struct LockPair<'a> {
    second: HeldAccount<'a>,
    first: HeldAccount<'a>,
    from_is_first: bool,
}

impl<'a> LockPair<'a> {
    /// Acquire both locks, smaller id first.
    fn acquire(from: &'a AccountSlot, to: &'a AccountSlot) -> Self {
        let from_is_first = from.id() < to.id();
        let (first_slot, second_slot) = if from_is_first { (from, to) } else { (to, from) };

        debug!(
            first = first_slot.id(),
            second = second_slot.id(),
            "Acquiring account locks"
        );
        let first = first_slot.hold();
        let second = second_slot.hold();

        Self {
            second,
            first,
            from_is_first,
        }
    }

    /// (from, to) views over the held accounts
    fn legs(&mut self) -> (&mut HeldAccount<'a>, &mut HeldAccount<'a>) {
        if self.from_is_first {
            (&mut self.first, &mut self.second)
        } else {
            (&mut self.second, &mut self.first)
        }
    }
}

/// Transfer Coordinator - deadlock-free debit/credit with compensation
pub struct TransferCoordinator {
    ledger: Arc<dyn Ledger>,
    compensation_retries: u32,
}

impl TransferCoordinator {
    pub fn new(store: Arc<AccountStore>) -> Self {
        Self::with_compensation_retries(store, DEFAULT_COMPENSATION_RETRIES)
    }

    pub fn with_compensation_retries(store: Arc<AccountStore>, compensation_retries: u32) -> Self {
        Self::over_ledger(store, compensation_retries)
    }

    pub(crate) fn over_ledger(ledger: Arc<dyn Ledger>, compensation_retries: u32) -> Self {
        Self {
            ledger,
            compensation_retries,
        }
    }

    /// Transfer `amount` from `from_id` to `to_id`.
    ///
    /// On `Err` both balances are exactly as they were before the call.
    ///
    /// # Panics
    /// If the credit leg fails and the debit cannot be undone. Money would
    /// otherwise have disappeared, which is never reported as a normal error.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, TransferError> {
        // Re-validated here so direct callers cannot bypass the gateway checks
        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount(amount));
        }
        if from_id == to_id {
            return Err(TransferError::SameAccount(from_id.to_string()));
        }

        let from_slot = self.ledger.slot(from_id)?;
        let to_slot = self.ledger.slot(to_id)?;

        let mut locks = LockPair::acquire(&from_slot, &to_slot);
        let (from, to) = locks.legs();

        self.ledger.debit_held(from, amount)?;

        if let Err(e) = self.ledger.credit_held(to, amount) {
            warn!(
                from = from_id,
                to = to_id,
                amount = %amount,
                error = %e,
                "Credit leg failed, compensating source"
            );
            self.compensate(from, amount, &e);
            return Err(e.into());
        }

        let receipt = TransferReceipt {
            from: from.snapshot(),
            to: to.snapshot(),
            amount,
        };
        info!(from = from_id, to = to_id, amount = %amount, "Transfer committed");
        Ok(receipt)
    }

    /// Put `amount` back on the source. Retries, then aborts.
    fn compensate(&self, from: &mut HeldAccount<'_>, amount: Decimal, cause: &AccountError) {
        for attempt in 0..=self.compensation_retries {
            match self.ledger.credit_held(from, amount) {
                Ok(()) => {
                    info!(account_id = from.id(), amount = %amount, "Transfer rolled back");
                    return;
                }
                Err(e) => {
                    warn!(
                        account_id = from.id(),
                        attempt = attempt + 1,
                        error = %e,
                        "Compensation failed"
                    );
                }
            }
        }

        error!(
            account_id = from.id(),
            amount = %amount,
            cause = %cause,
            "Compensation exhausted: debited amount cannot be restored"
        );
        panic!(
            "transfer invariant violated: {} debited from {} could not be restored after credit failure ({})",
            amount,
            from.id(),
            cause
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn setup(accounts: &[(&str, Decimal)]) -> (Arc<AccountStore>, TransferCoordinator) {
        let store = Arc::new(AccountStore::new());
        for (id, balance) in accounts {
            store.create(id, *balance).unwrap();
        }
        let coordinator = TransferCoordinator::new(store.clone());
        (store, coordinator)
    }

    #[test]
    fn test_transfer_success() {
        let (store, coordinator) = setup(&[("A", dec!(1000)), ("B", dec!(1000))]);

        let receipt = coordinator.transfer("A", "B", dec!(10)).unwrap();

        assert_eq!(receipt.from.balance(), dec!(990));
        assert_eq!(receipt.to.balance(), dec!(1010));
        assert_eq!(store.get("A").unwrap().balance(), dec!(990));
        assert_eq!(store.get("B").unwrap().balance(), dec!(1010));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (store, coordinator) = setup(&[("A", dec!(1000)), ("B", dec!(1000))]);

        let result = coordinator.transfer("A", "B", dec!(2000));

        assert_eq!(
            result,
            Err(TransferError::Account(AccountError::InsufficientBalance(
                "A".into()
            )))
        );
        assert_eq!(store.get("A").unwrap().balance(), dec!(1000));
        assert_eq!(store.get("B").unwrap().balance(), dec!(1000));
    }

    #[test]
    fn test_transfer_to_unknown_account() {
        let (store, coordinator) = setup(&[("A", dec!(1000))]);

        let result = coordinator.transfer("A", "nonexistent", dec!(10));

        assert_eq!(
            result,
            Err(TransferError::Account(AccountError::NotFound(
                "nonexistent".into()
            )))
        );
        assert_eq!(store.get("A").unwrap().balance(), dec!(1000));
    }

    #[test]
    fn test_transfer_from_unknown_account() {
        let (store, coordinator) = setup(&[("B", dec!(1000))]);

        let result = coordinator.transfer("ghost", "B", dec!(10));

        assert!(matches!(
            result,
            Err(TransferError::Account(AccountError::NotFound(ref id))) if id == "ghost"
        ));
        assert_eq!(store.get("B").unwrap().balance(), dec!(1000));
    }

    #[test]
    fn test_transfer_rejects_non_positive_amount() {
        // No accounts at all: validation must happen before any lookup
        let (_store, coordinator) = setup(&[]);

        assert_eq!(
            coordinator.transfer("A", "B", Decimal::ZERO),
            Err(TransferError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            coordinator.transfer("A", "B", dec!(-10)),
            Err(TransferError::InvalidAmount(dec!(-10)))
        );
    }

    #[test]
    fn test_transfer_same_account() {
        let (store, coordinator) = setup(&[("A", dec!(1000))]);

        assert_eq!(
            coordinator.transfer("A", "A", dec!(10)),
            Err(TransferError::SameAccount("A".into()))
        );
        assert_eq!(store.get("A").unwrap().balance(), dec!(1000));
    }

    #[test]
    fn test_transfer_entire_balance() {
        let (store, coordinator) = setup(&[("A", dec!(25.5)), ("B", dec!(0))]);

        coordinator.transfer("A", "B", dec!(25.5)).unwrap();

        assert_eq!(store.get("A").unwrap().balance(), Decimal::ZERO);
        assert_eq!(store.get("B").unwrap().balance(), dec!(25.5));
    }

    #[test]
    fn test_lock_order_is_direction_independent() {
        let store = AccountStore::new();
        store.create("alpha", dec!(1)).unwrap();
        store.create("beta", dec!(1)).unwrap();
        let a = store.slot("alpha").unwrap();
        let b = store.slot("beta").unwrap();

        {
            let mut pair = LockPair::acquire(&a, &b);
            assert_eq!(pair.first.id(), "alpha");
            let (from, to) = pair.legs();
            assert_eq!((from.id(), to.id()), ("alpha", "beta"));
        }
        {
            let mut pair = LockPair::acquire(&b, &a);
            assert_eq!(pair.first.id(), "alpha");
            let (from, to) = pair.legs();
            assert_eq!((from.id(), to.id()), ("beta", "alpha"));
        }
    }

    #[test]
    fn test_opposite_transfers_do_not_deadlock() {
        let (store, coordinator) = setup(&[("A", dec!(1000)), ("B", dec!(1000))]);
        let coordinator = Arc::new(coordinator);

        for _ in 0..200 {
            let (tx, rx) = mpsc::channel();
            for (from, to) in [("A", "B"), ("B", "A")] {
                let coordinator = Arc::clone(&coordinator);
                let tx = tx.clone();
                thread::spawn(move || {
                    let result = coordinator.transfer(from, to, dec!(1));
                    tx.send(result.is_ok()).unwrap();
                });
            }
            drop(tx);

            for _ in 0..2 {
                let ok = rx
                    .recv_timeout(Duration::from_secs(5))
                    .expect("transfer did not complete: possible deadlock");
                assert!(ok);
            }
        }

        let total = store.get("A").unwrap().balance() + store.get("B").unwrap().balance();
        assert_eq!(total, dec!(2000));
    }
}
