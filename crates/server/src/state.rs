use std::sync::Arc;

use service::accounts::{AccountStore, InMemoryAccountStore};
use service::external::ExternalDataService;

/// Shared handler state: the account store handle plus the external relay.
#[derive(Clone)]
pub struct ServerState {
    pub accounts: Arc<dyn AccountStore>,
    pub external: ExternalDataService,
}

impl ServerState {
    pub fn new(accounts: Arc<dyn AccountStore>, external: ExternalDataService) -> Self {
        Self { accounts, external }
    }

    /// State over a freshly seeded in-memory store.
    pub fn seeded(external: ExternalDataService) -> Self {
        Self::new(Arc::new(InMemoryAccountStore::seeded()), external)
    }
}
