use async_trait::async_trait;

use crate::accounts::domain::{Account, AccountPatch, NewAccountInput};
use crate::errors::ServiceError;

/// Trait abstraction for account storage.
/// The server only talks to this seam, so a different backend can replace the in-memory one.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn list(&self) -> Vec<Account>;
    async fn get(&self, id: u64) -> Result<Account, ServiceError>;
    async fn create(&self, input: NewAccountInput) -> Result<Account, ServiceError>;
    async fn update(&self, id: u64, patch: AccountPatch) -> Result<Account, ServiceError>;
    /// Removes one record and returns it as it was before removal.
    async fn delete(&self, id: u64) -> Result<Account, ServiceError>;
}
