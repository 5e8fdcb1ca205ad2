use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::accounts::domain::{next_id, seed_accounts, Account, AccountPatch, NewAccountInput};
use crate::accounts::store::AccountStore;
use crate::errors::ServiceError;

/// Process-memory account collection.
///
/// Keeps insertion order in a `Vec`. Every mutation holds the write lock for
/// its whole find-and-modify sequence, so id assignment and removal never
/// interleave across request tasks. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    inner: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountStore {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding the two startup records (ids 1 and 2).
    pub fn seeded() -> Self {
        Self::with_accounts(seed_accounts())
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self { inner: Arc::new(RwLock::new(accounts)) }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn list(&self) -> Vec<Account> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: u64) -> Result<Account, ServiceError> {
        let accounts = self.inner.read().await;
        accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("account"))
    }

    async fn create(&self, input: NewAccountInput) -> Result<Account, ServiceError> {
        let new = input.validate()?;
        let mut accounts = self.inner.write().await;
        let account = Account {
            id: next_id(&accounts),
            name: new.name,
            balance: new.balance,
            email: new.email,
        };
        accounts.push(account.clone());
        info!(id = account.id, total = accounts.len(), "account created");
        Ok(account)
    }

    async fn update(&self, id: u64, patch: AccountPatch) -> Result<Account, ServiceError> {
        let mut accounts = self.inner.write().await;
        let existing = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::not_found("account"))?;
        if patch.is_empty() {
            debug!(id, "empty patch, account left as is");
        }
        patch.apply_to(existing);
        info!(id, "account updated");
        Ok(existing.clone())
    }

    async fn delete(&self, id: u64) -> Result<Account, ServiceError> {
        let mut accounts = self.inner.write().await;
        let index = accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ServiceError::not_found("account"))?;
        let removed = accounts.remove(index);
        info!(id, total = accounts.len(), "account deleted");
        Ok(removed)
    }
}
