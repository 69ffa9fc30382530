//! Foundation types for Umbra.
//!
//! Every other Umbra crate depends on `umbra-types` for the identities that
//! key its records.
//!
//! # Key Types
//!
//! - [`UserId`] — Opaque chat-platform user identity (global, not per guild)
//! - [`GuildId`] — Opaque chat-platform guild identity
//! - [`PetKey`] — Composite (guild, user) key for pet records
//! - [`Balance`] — Currency amount held by a user

pub mod error;
pub mod identity;

pub use error::TypeError;
pub use identity::{GuildId, PetKey, UserId};

/// Currency units held by a single user.
pub type Balance = i64;
