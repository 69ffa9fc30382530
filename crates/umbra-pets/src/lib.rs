//! Pet registry for Umbra.
//!
//! Every guild member can own at most one pet. Pets live only as long as the
//! process that owns the [`PetRegistry`]; nothing is persisted.
//!
//! # Lifecycle
//!
//! - **summon** creates a pet from the registry's [`PetTemplate`], replacing
//!   any pet already at that key.
//! - **feed** rewrites the pet's state label.
//! - **fuse** promotes the pet to the highest [`Rarity`]. Rarity never moves
//!   down again.
//! - **release** deletes the pet.
//!
//! Feed, fuse and release on a key without a pet return
//! [`PetOutcome::NotFound`] instead of failing.
//!
//! # Modules
//!
//! - [`types`] — [`Pet`], [`Rarity`], [`PetTemplate`]
//! - [`registry`] — [`PetRegistry`] and [`PetOutcome`]

pub mod registry;
pub mod types;

pub use registry::{PetOutcome, PetRegistry};
pub use types::{Pet, PetTemplate, Rarity};
