//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores all card definitions for a combat.
//! It provides fast lookup by `CardId` and supports iteration.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};

/// Catalog of card definitions.
///
/// Decks and hands hold `CardId`s; stats are resolved through the catalog.
///
/// ## Example
///
/// ```
/// use cardclash::cards::{Card, CardCatalog, CardType};
///
/// let mut catalog = CardCatalog::new();
/// let id = catalog.register_auto(Card::new("Longsword", CardType::Melee, 4, 2));
///
/// let found = catalog.get(id).unwrap();
/// assert_eq!(found.name, "Longsword");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
    next_id: u32,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card under an explicit ID.
    ///
    /// Panics if a card with the same ID already exists - duplicate
    /// registration is a load-time programming error, not a runtime
    /// condition.
    pub fn register(&mut self, id: CardId, card: Card) {
        if self.cards.contains_key(&id) {
            panic!("Card with ID {:?} already registered", id);
        }
        self.next_id = self.next_id.max(id.raw() + 1);
        self.cards.insert(id, card);
    }

    /// Register a card with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register_auto(&mut self, card: Card) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        self.cards.insert(id, card);
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, panicking if not found.
    ///
    /// Use when you're certain the card exists (e.g. ids that came from a
    /// validated deck).
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &Card {
        self.cards.get(&id).expect("Card not found in catalog")
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all (id, card) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards.iter().map(|(&id, card)| (id, card))
    }
}
