//! Account-to-account transfers
//!
//! # Safety Invariants
//!
//! 1. **Canonical Lock Order**: both account locks are taken smaller id first,
//!    independent of transfer direction, and released in reverse
//! 2. **Debit Before Credit**: a failed debit leaves nothing to undo
//! 3. **Compensate Or Abort**: a failed credit is undone on the source; if
//!    that is impossible the process faults instead of reporting an error

pub mod coordinator;
pub mod error;

pub use coordinator::{DEFAULT_COMPENSATION_RETRIES, TransferCoordinator, TransferReceipt};
pub use error::TransferError;
