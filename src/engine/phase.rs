//! Round phases and phase-advance results.
//!
//! The engine is cooperative: it never blocks or polls. Instead,
//! [`advance`](crate::engine::CombatEngine::advance) runs every step it can
//! and returns a [`Progress`] value naming what it is waiting for. The
//! external caller flips the two gates (card assignment complete, ability
//! phase finished) and calls `advance` again.
//!
//! Initiative ordering, clash resolution, and status decay have no external
//! inputs, so they run atomically inside a single `advance` call; only the
//! two gated phases persist between calls.

use serde::{Deserialize, Serialize};

use crate::engine::events::Outcome;

/// The engine's persistent position within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for every living player character to have an assigned card.
    CardSelection,
    /// Waiting for the caller to finish the ability phase.
    Abilities,
    /// Combat has ended.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::CardSelection => write!(f, "card selection"),
            Phase::Abilities => write!(f, "abilities"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// What `advance` accomplished, or what it is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Some living player character still needs a card.
    AwaitingCards,
    /// The ability gate has not been flipped yet.
    AwaitingAbilities,
    /// A full round resolved; the next one is in card selection.
    RoundComplete {
        /// The round that just finished.
        round: u32,
    },
    /// Combat is over. Returned idempotently on further calls.
    Finished(Outcome),
}
