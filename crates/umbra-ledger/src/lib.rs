//! Currency ledger for the Umbra economy.
//!
//! The ledger maps every user identity to a single integer balance. Records
//! are created lazily the first time a user is touched and are never
//! deleted. Debits floor at zero; a direct override is the only way to store
//! a negative balance.
//!
//! # Storage Backends
//!
//! All backends implement the [`BalanceStore`] trait:
//!
//! - [`JsonFileLedger`] -- durable store, rewrites the whole mapping as
//!   pretty-printed JSON after every mutation
//! - [`InMemoryLedger`] -- same semantics without durability, for tests and
//!   embedding
//!
//! # Design Rules
//!
//! 1. One record per user, materialized to 0 on first touch.
//! 2. Every mutation is durable before the call returns.
//! 3. A corrupt ledger file is logged and replaced by an empty mapping; it
//!    never aborts startup.
//! 4. Persistence failures are returned to the caller, never swallowed.

pub mod book;
pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use book::{BalanceBook, Mutation};
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use file::{JsonFileLedger, LoadOutcome};
pub use memory::InMemoryLedger;
pub use traits::BalanceStore;
