//! Card definitions - static card data.
//!
//! A `Card` holds the immutable properties of a playable card: its combat
//! style, attack and defense values, and the status effect it inflicts on
//! hit. Cards are registered once in a [`CardCatalog`](super::CardCatalog)
//! at load time and referenced by [`CardId`] everywhere else - decks and
//! hands never own card data.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the card "type" (e.g. "Fireball"), not a specific copy
/// in a deck - decks may contain the same `CardId` many times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Combat style of a card.
///
/// Card types are the combo currency: two cumulative plays of the same type
/// on one side trigger a combo bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Melee,
    Magic,
    Ranged,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Melee => write!(f, "Melee"),
            CardType::Magic => write!(f, "Magic"),
            CardType::Ranged => write!(f, "Ranged"),
        }
    }
}

/// One-round debuff a card inflicts on hit.
///
/// A character carries at most one active status; applying a new one
/// overwrites the old. Effects while active:
/// - `Fire`: -1 defense
/// - `Poison`: -1 attack
/// - `Ice`: abilities sealed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    #[default]
    None,
    Fire,
    Poison,
    Ice,
}

impl StatusEffect {
    /// Whether this is an actual effect (anything but `None`).
    #[must_use]
    pub const fn is_some(self) -> bool {
        !matches!(self, StatusEffect::None)
    }
}

impl std::fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusEffect::None => write!(f, "None"),
            StatusEffect::Fire => write!(f, "Fire"),
            StatusEffect::Poison => write!(f, "Poison"),
            StatusEffect::Ice => write!(f, "Ice"),
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use cardclash::cards::{Card, CardType, StatusEffect};
///
/// let sword = Card::new("Longsword", CardType::Melee, 4, 2);
/// assert_eq!(sword.attack, 4);
/// assert!(!sword.status_effect.is_some());
///
/// let torch = Card::new("Torch", CardType::Melee, 2, 0).with_status(StatusEffect::Fire);
/// assert!(torch.status_effect.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (for display/debugging).
    pub name: String,

    /// Combat style, used for combo tracking.
    pub card_type: CardType,

    /// Base attack contributed while assigned.
    pub attack: i32,

    /// Base defense contributed while assigned.
    pub defense: i32,

    /// Status inflicted on the defender when this card's wielder hits.
    pub status_effect: StatusEffect,
}

impl Card {
    /// Create a new card with no status effect.
    ///
    /// Attack and defense must be non-negative.
    #[must_use]
    pub fn new(name: impl Into<String>, card_type: CardType, attack: i32, defense: i32) -> Self {
        assert!(attack >= 0, "Card attack must be non-negative");
        assert!(defense >= 0, "Card defense must be non-negative");

        Self {
            name: name.into(),
            card_type,
            attack,
            defense,
            status_effect: StatusEffect::None,
        }
    }

    /// Set the inflicted status (builder pattern).
    #[must_use]
    pub fn with_status(mut self, status: StatusEffect) -> Self {
        self.status_effect = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new("Poison Dart", CardType::Ranged, 2, 1)
            .with_status(StatusEffect::Poison);

        assert_eq!(card.name, "Poison Dart");
        assert_eq!(card.card_type, CardType::Ranged);
        assert_eq!(card.attack, 2);
        assert_eq!(card.defense, 1);
        assert_eq!(card.status_effect, StatusEffect::Poison);
    }

    #[test]
    fn test_status_is_some() {
        assert!(!StatusEffect::None.is_some());
        assert!(StatusEffect::Fire.is_some());
        assert!(StatusEffect::Poison.is_some());
        assert!(StatusEffect::Ice.is_some());
    }

    #[test]
    #[should_panic(expected = "attack must be non-negative")]
    fn test_negative_attack_rejected() {
        let _ = Card::new("Broken", CardType::Melee, -1, 0);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new("Fireball", CardType::Magic, 5, 0).with_status(StatusEffect::Fire);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
