//! Client side of the account manager.
//!
//! [`api::HttpAccountApi`] talks to the `/api` endpoints, [`sync::AccountSync`]
//! keeps a local mirror of the collection plus form state, and [`view`]
//! renders that state as text.

pub mod api;
pub mod command;
pub mod errors;
pub mod sync;
pub mod view;

pub use api::{AccountApi, HttpAccountApi};
pub use command::Command;
pub use errors::ClientError;
pub use sync::{AccountDraft, AccountSync, Flash, FlashKind};
