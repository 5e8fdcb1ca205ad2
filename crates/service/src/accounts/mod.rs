//! Account collection: domain inputs, the storage trait and its in-memory backend.

pub mod domain;
pub mod memory;
pub mod store;

pub use domain::{Account, AccountPatch, NewAccount, NewAccountInput};
pub use memory::InMemoryAccountStore;
pub use store::AccountStore;
