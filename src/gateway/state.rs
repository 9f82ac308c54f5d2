use std::sync::Arc;

use crate::account::AccountStore;
use crate::notification::TransferNotifier;
use crate::transfer::TransferCoordinator;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Account registry
    pub store: Arc<AccountStore>,
    /// Transfer coordinator over `store`
    pub coordinator: Arc<TransferCoordinator>,
    /// Post-transfer notification sink
    pub notifier: Arc<dyn TransferNotifier>,
}

impl AppState {
    pub fn new(
        store: Arc<AccountStore>,
        compensation_retries: u32,
        notifier: Arc<dyn TransferNotifier>,
    ) -> Self {
        let coordinator = Arc::new(TransferCoordinator::with_compensation_retries(
            store.clone(),
            compensation_retries,
        ));
        Self {
            store,
            coordinator,
            notifier,
        }
    }
}
