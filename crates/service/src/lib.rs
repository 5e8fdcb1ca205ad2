//! Service layer for the account manager.
//! - `accounts`: the authoritative in-memory account collection.
//! - `external`: the outbound relay to a third-party JSON endpoint.

pub mod accounts;
pub mod errors;
pub mod external;
