//! Account module
//!
//! In-memory account store with per-account locking.
//!
//! Account locks are only reachable from inside the crate. Outside callers
//! go through `AccountStore` for single accounts and `TransferCoordinator`
//! for pairs, so every two-lock path uses the canonical order.
//!
//! ```compile_fail
//! use ledger_core::account::Ledger;
//! ```
//!
//! ```compile_fail
//! use ledger_core::account::AccountStore;
//! let store = AccountStore::new();
//! store.create("A", rust_decimal::Decimal::ONE).unwrap();
//! let _held = store.slot("A").unwrap().hold();
//! ```

pub mod error;
pub mod models;
pub mod store;

pub use error::AccountError;
pub use models::Account;
pub use store::AccountStore;
pub(crate) use store::{AccountSlot, HeldAccount, Ledger};
