//! Engine error taxonomy.
//!
//! Every rejected operation maps to a variant here. Rejections are local
//! precondition failures surfaced to the adapter - none are fatal, and a
//! rejected call leaves the engine state untouched.

use thiserror::Error;

use crate::engine::phase::Phase;

/// Reasons the engine refuses an operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The operation is not valid in the current phase.
    #[error("operation not valid during the {0} phase")]
    WrongPhase(Phase),

    /// Only player-side characters can be driven externally.
    #[error("{0} is not on the player side")]
    NotPlayerSide(crate::character::CharacterId),

    /// The character address does not resolve to a roster slot.
    #[error("no character at {0}")]
    UnknownCharacter(crate::character::CharacterId),

    /// Dead characters take no further part in the combat.
    #[error("{0} is dead")]
    DeadCharacter(crate::character::CharacterId),

    /// The character already has a card this round.
    #[error("{0} already has an assigned card")]
    CardAlreadyAssigned(crate::character::CharacterId),

    /// The card is not in the player's hand.
    #[error("{0} is not in hand")]
    CardNotInHand(crate::cards::CardId),

    /// The character has no unique ability configured.
    #[error("{0} has no ability")]
    NoAbility(crate::character::CharacterId),

    /// Abilities activate at most once per combat.
    #[error("{0} has already used their ability")]
    AbilityAlreadyUsed(crate::character::CharacterId),

    /// Ice seals abilities while active.
    #[error("{0} cannot use abilities while frozen")]
    AbilitySealed(crate::character::CharacterId),

    /// The combat has already produced an outcome.
    #[error("combat is already over")]
    CombatOver,

    /// Rosters must have at least one member.
    #[error("the {0} roster is empty")]
    EmptyRoster(crate::character::Side),

    /// The shared deck must have at least one card.
    #[error("the deck is empty")]
    EmptyDeck,

    /// Every deck entry must resolve in the catalog.
    #[error("deck references {0}, which is not in the catalog")]
    UnknownCard(crate::cards::CardId),
}
