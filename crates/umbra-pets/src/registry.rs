//! The owned, in-memory pet registry.
//!
//! [`PetRegistry`] keeps a `HashMap` keyed by [`PetKey`]. All mutators take
//! `&mut self`; the caller owns the registry for the lifetime of the process.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;
use umbra_types::{GuildId, PetKey, UserId};

use crate::types::{Pet, PetTemplate, Rarity};

/// Result of a pet operation that needs an existing pet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PetOutcome {
    /// The pet existed and the operation was applied.
    Done { message: String },
    /// No pet is registered at this key.
    NotFound { key: PetKey },
}

impl PetOutcome {
    /// `true` if the operation found a pet and acted on it.
    pub fn is_done(&self) -> bool {
        matches!(self, PetOutcome::Done { .. })
    }

    /// Confirmation message, if the operation was applied.
    pub fn message(&self) -> Option<&str> {
        match self {
            PetOutcome::Done { message } => Some(message),
            PetOutcome::NotFound { .. } => None,
        }
    }
}

/// Registry of one pet per (guild, user).
#[derive(Debug, Default)]
pub struct PetRegistry {
    pets: HashMap<PetKey, Pet>,
    template: PetTemplate,
}

impl PetRegistry {
    /// Create an empty registry that summons pets from the default template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom summon template.
    pub fn with_template(template: PetTemplate) -> Self {
        Self {
            pets: HashMap::new(),
            template,
        }
    }

    pub fn template(&self) -> &PetTemplate {
        &self.template
    }

    /// Number of registered pets across all guilds.
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Summon a fresh pet for `user` in `guild`.
    ///
    /// Any pet already at this key is replaced without warning.
    pub fn summon(&mut self, guild: &GuildId, user: &UserId) -> &Pet {
        let key = key(guild, user);
        let pet = self.template.instantiate(Utc::now());
        debug!(key = %key, name = %pet.name, "pet summoned");
        self.pets.insert(key.clone(), pet);
        &self.pets[&key]
    }

    /// The pet registered for `user` in `guild`, if any.
    pub fn view(&self, guild: &GuildId, user: &UserId) -> Option<&Pet> {
        self.pets.get(&key(guild, user))
    }

    /// Feed the pet `food`, updating its state label.
    pub fn feed(&mut self, guild: &GuildId, user: &UserId, food: &str) -> PetOutcome {
        let key = key(guild, user);
        let Some(pet) = self.pets.get_mut(&key) else {
            return PetOutcome::NotFound { key };
        };
        pet.state = format!("Satisfecho tras comer {food}");
        debug!(key = %key, food, "pet fed");
        PetOutcome::Done {
            message: format!("{} ha comido {food} con gusto.", pet.name),
        }
    }

    /// Fuse the pet with the abyss: rarity becomes the highest tier and the
    /// state label is overwritten. Fusing an already fused pet still
    /// succeeds.
    pub fn fuse(&mut self, guild: &GuildId, user: &UserId) -> PetOutcome {
        let key = key(guild, user);
        let Some(pet) = self.pets.get_mut(&key) else {
            return PetOutcome::NotFound { key };
        };
        pet.rarity = pet.rarity.max(Rarity::highest());
        pet.state = "Fusionado con el abismo".to_string();
        debug!(key = %key, rarity = %pet.rarity, "pet fused");
        PetOutcome::Done {
            message: format!(
                "{} se ha fusionado con el abismo y ahora es {}.",
                pet.name, pet.rarity
            ),
        }
    }

    /// Release (delete) the pet.
    pub fn release(&mut self, guild: &GuildId, user: &UserId) -> PetOutcome {
        let key = key(guild, user);
        match self.pets.remove(&key) {
            Some(pet) => {
                debug!(key = %key, "pet released");
                PetOutcome::Done {
                    message: format!("{} ha regresado a las sombras.", pet.name),
                }
            }
            None => PetOutcome::NotFound { key },
        }
    }

    /// Every pet in `guild`, sorted by user id.
    pub fn pets_in_guild(&self, guild: &GuildId) -> Vec<(&UserId, &Pet)> {
        let mut pets: Vec<(&UserId, &Pet)> = self
            .pets
            .iter()
            .filter(|(k, _)| &k.guild == guild)
            .map(|(k, p)| (&k.user, p))
            .collect();
        pets.sort_by(|(a, _), (b, _)| a.cmp(b));
        pets
    }
}

fn key(guild: &GuildId, user: &UserId) -> PetKey {
    PetKey::new(guild.clone(), user.clone())
}
