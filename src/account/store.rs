//! In-memory account store
//!
//! The store is the single owner of every balance. The id → account map is a
//! sharded `DashMap`, and each account carries its own `Mutex`, so operations
//! on different accounts never contend with each other.
//!
//! # Lock discipline
//!
//! 1. A map shard guard is never held while an account lock is acquired
//!    (`slot()` clones the `Arc` out and drops the guard first).
//! 2. Only the store mutates a balance, and only through a [`HeldAccount`],
//!    i.e. while that account's lock is held.
//! 3. Callers that need two accounts at once go through
//!    [`TransferCoordinator`](crate::transfer::TransferCoordinator), which
//!    acquires them in canonical order.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::AccountError;
use super::models::Account;

/// Storage cell for one account: immutable id plus the lock-protected balance.
///
/// Slots are shared through `Arc` so a caller can keep hold of the account
/// while it waits for the lock without pinning a map shard.
#[derive(Debug)]
pub(crate) struct AccountSlot {
    id: String,
    balance: Mutex<Decimal>,
}

impl AccountSlot {
    fn new(id: String, balance: Decimal) -> Self {
        Self {
            id,
            balance: Mutex::new(balance),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Block until this account's lock is acquired.
    ///
    /// # Panics
    /// If the lock is poisoned. A thread died while holding this account,
    /// so its balance can no longer be trusted.
    pub fn hold(&self) -> HeldAccount<'_> {
        let balance = match self.balance.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("account lock poisoned: {}", self.id),
        };
        HeldAccount {
            slot: self,
            balance,
        }
    }
}

/// An account whose lock is held by the current thread.
///
/// Dropping it releases the lock.
#[derive(Debug)]
pub(crate) struct HeldAccount<'a> {
    slot: &'a AccountSlot,
    balance: MutexGuard<'a, Decimal>,
}

impl HeldAccount<'_> {
    pub fn id(&self) -> &str {
        &self.slot.id
    }

    pub fn balance(&self) -> Decimal {
        *self.balance
    }

    pub fn snapshot(&self) -> Account {
        Account::new(self.slot.id.clone(), *self.balance)
    }

    fn subtract(&mut self, amount: Decimal) -> Result<(), AccountError> {
        // Equal amount drains to zero; only strictly greater is rejected.
        if amount > *self.balance {
            return Err(AccountError::InsufficientBalance(self.slot.id.clone()));
        }
        *self.balance -= amount;
        Ok(())
    }

    fn add(&mut self, amount: Decimal) -> Result<(), AccountError> {
        *self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| AccountError::InvalidAmount {
                id: self.slot.id.clone(),
                amount,
            })?;
        Ok(())
    }
}

/// Balance operations the transfer coordinator depends on.
///
/// `AccountStore` is the production implementation. The seam exists so the
/// coordinator can be driven against ledgers that inject failures. It stays
/// crate-private: outside callers never get a path that locks accounts.
pub(crate) trait Ledger: Send + Sync {
    /// Look up the shared slot for an account without locking it.
    fn slot(&self, id: &str) -> Result<Arc<AccountSlot>, AccountError>;

    /// Debit an account whose lock the caller already holds.
    fn debit_held(
        &self,
        held: &mut HeldAccount<'_>,
        amount: Decimal,
    ) -> Result<(), AccountError>;

    /// Credit an account whose lock the caller already holds.
    fn credit_held(
        &self,
        held: &mut HeldAccount<'_>,
        amount: Decimal,
    ) -> Result<(), AccountError>;
}

/// Concurrent in-memory account store
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<String, Arc<AccountSlot>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create an account.
    ///
    /// The existence check and the insert happen under the same shard lock,
    /// so concurrent creates of one id produce exactly one winner.
    pub fn create(&self, id: &str, initial_balance: Decimal) -> Result<Account, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                id: id.to_string(),
                amount: initial_balance,
            });
        }

        match self.accounts.entry(id.to_string()) {
            Entry::Occupied(_) => Err(AccountError::Duplicate(id.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(AccountSlot::new(id.to_string(), initial_balance)));
                info!(account_id = id, balance = %initial_balance, "Account created");
                Ok(Account::new(id, initial_balance))
            }
        }
    }

    /// Read a consistent snapshot of an account.
    pub fn get(&self, id: &str) -> Result<Account, AccountError> {
        let slot = self.slot(id)?;
        let held = slot.hold();
        Ok(held.snapshot())
    }

    /// Subtract `amount`, failing if it exceeds the current balance.
    ///
    /// Returns the account as it stands after the debit.
    pub fn debit(&self, id: &str, amount: Decimal) -> Result<Account, AccountError> {
        let slot = self.slot(id)?;
        let mut held = slot.hold();
        self.debit_held(&mut held, amount)?;
        Ok(held.snapshot())
    }

    /// Add `amount` to the balance.
    ///
    /// Returns the account as it stands after the credit.
    pub fn credit(&self, id: &str, amount: Decimal) -> Result<Account, AccountError> {
        let slot = self.slot(id)?;
        let mut held = slot.hold();
        self.credit_held(&mut held, amount)?;
        Ok(held.snapshot())
    }

    /// Drop every account. Test-harness reset only.
    ///
    /// Takes shard locks one at a time and never touches account locks, so
    /// an in-flight transfer is not blocked; it will see its accounts as
    /// vanished on its next mutation.
    pub fn clear(&self) {
        self.accounts.clear();
        info!("All accounts cleared");
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The slot behind `held` is still the one registered under its id.
    fn is_registered(&self, held: &HeldAccount<'_>) -> bool {
        self.accounts
            .get(held.id())
            .is_some_and(|entry| std::ptr::eq(Arc::as_ptr(entry.value()), held.slot))
    }

    fn check_amount(id: &str, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                id: id.to_string(),
                amount,
            });
        }
        Ok(())
    }
}

impl Ledger for AccountStore {
    fn slot(&self, id: &str) -> Result<Arc<AccountSlot>, AccountError> {
        // Clone the Arc so the shard guard is released before any account lock.
        self.accounts
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    fn debit_held(
        &self,
        held: &mut HeldAccount<'_>,
        amount: Decimal,
    ) -> Result<(), AccountError> {
        Self::check_amount(held.id(), amount)?;
        if !self.is_registered(held) {
            return Err(AccountError::NotFound(held.id().to_string()));
        }
        held.subtract(amount)?;
        debug!(account_id = held.id(), amount = %amount, balance = %held.balance(), "Debit applied");
        Ok(())
    }

    fn credit_held(
        &self,
        held: &mut HeldAccount<'_>,
        amount: Decimal,
    ) -> Result<(), AccountError> {
        Self::check_amount(held.id(), amount)?;
        if !self.is_registered(held) {
            return Err(AccountError::NotFound(held.id().to_string()));
        }
        held.add(amount)?;
        debug!(account_id = held.id(), amount = %amount, balance = %held.balance(), "Credit applied");
        Ok(())
    }
}
