//! ledger_core - Concurrent in-memory account ledger
//!
//! # Modules
//!
//! - [`account`] - Account registry with per-account locking
//! - [`transfer`] - Two-account transfers with canonical lock order and rollback
//! - [`notification`] - Post-transfer notices to account holders
//! - [`gateway`] - HTTP API over the registry and coordinator
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod account;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod notification;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountError, AccountStore};
pub use notification::{LogNotifier, TransferNotifier};
pub use transfer::{TransferCoordinator, TransferError, TransferReceipt};
