//! Shared building blocks for the ledger record contracts.
//!
//! Holds the error taxonomy, the key-value store collaborator the contracts
//! read and write through, and the `Init` / `Invoke` / `Query` entry-point
//! trait every contract implements.

pub mod contract;
pub mod error;
pub mod store;

pub use contract::{positional_args, require_args, Contract, Surface};
pub use error::{Error, Result};
pub use store::{KeyValueStore, MemoryStore, RedisStore};
