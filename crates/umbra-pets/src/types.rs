//! Core pet types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pet rarity tier, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "Común")]
    Common,
    #[serde(rename = "Rara")]
    Rare,
    #[serde(rename = "Abismal")]
    Abyssal,
}

impl Rarity {
    /// The top tier. Fusion always lands here.
    pub const fn highest() -> Self {
        Rarity::Abyssal
    }

    /// Display label shown to chat users.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Común",
            Rarity::Rare => "Rara",
            Rarity::Abyssal => "Abismal",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attributes every freshly summoned pet starts with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetTemplate {
    pub name: String,
    pub species: String,
    pub rarity: Rarity,
    pub state: String,
}

impl Default for PetTemplate {
    fn default() -> Self {
        Self {
            name: "Umbra".to_string(),
            species: "Sombra".to_string(),
            rarity: Rarity::Rare,
            state: "Tranquilo".to_string(),
        }
    }
}

impl PetTemplate {
    /// Instantiate a pet from this template.
    pub fn instantiate(&self, summoned_at: DateTime<Utc>) -> Pet {
        Pet {
            name: self.name.clone(),
            species: self.species.clone(),
            rarity: self.rarity,
            state: self.state.clone(),
            summoned_at,
        }
    }
}

/// A summoned pet.
///
/// `state` is a free-form status label; together with `rarity` it is the
/// pet's whole observable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub rarity: Rarity,
    pub state: String,
    pub summoned_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_is_ordered() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Abyssal);
        assert_eq!(Rarity::highest(), Rarity::Abyssal);
    }

    #[test]
    fn rarity_labels() {
        assert_eq!(Rarity::Common.to_string(), "Común");
        assert_eq!(Rarity::Rare.to_string(), "Rara");
        assert_eq!(Rarity::Abyssal.to_string(), "Abismal");
    }

    #[test]
    fn default_template() {
        let t = PetTemplate::default();
        assert_eq!(t.name, "Umbra");
        assert_eq!(t.rarity, Rarity::Rare);
    }

    #[test]
    fn pet_serializes_with_display_names() {
        let pet = PetTemplate::default().instantiate(Utc::now());
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["name"], "Umbra");
        assert_eq!(json["type"], "Sombra");
        assert_eq!(json["rarity"], "Rara");
        assert_eq!(json["state"], "Tranquilo");
    }
}
