//! Combat events consumed by the presentation adapter.
//!
//! The engine never calls back into the host. Everything notable that
//! happens - round boundaries, card assignments, ability use, damage,
//! statuses, combos, deaths, the final outcome - is pushed as a typed
//! [`CombatEvent`]. The adapter drains pending events after each engine
//! call and renders them however it likes; `Display` provides a ready-made
//! combat-log line for each event.
//!
//! Events carry [`CharacterId`]s rather than names; resolve them through
//! [`CombatEngine::character`](crate::engine::CombatEngine::character) when
//! a display name is needed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, CardType, StatusEffect};
use crate::character::CharacterId;

/// Final result of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerVictory,
    OpponentVictory,
}

impl Outcome {
    /// Whether the player side won.
    #[must_use]
    pub const fn player_won(self) -> bool {
        matches!(self, Outcome::PlayerVictory)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::PlayerVictory => write!(f, "victory"),
            Outcome::OpponentVictory => write!(f, "defeat"),
        }
    }
}

/// One notable occurrence during a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A round began.
    RoundStart { round: u32 },

    /// A round finished without ending the combat.
    RoundEnd { round: u32 },

    /// A character received a card for this round (either side).
    CardAssigned { character: CharacterId, card: CardId },

    /// A character activated their unique ability.
    AbilityUsed { caster: CharacterId, ability: String },

    /// Initiative ordering of all living characters, fastest first.
    /// Informational: clash pairing is positional, not initiative-driven.
    InitiativeOrder { order: SmallVec<[CharacterId; 8]> },

    /// An attack landed (possibly for 0 after defense).
    DamageDealt {
        attacker: CharacterId,
        target: CharacterId,
        amount: i32,
        remaining_hp: i32,
    },

    /// A card's status effect was applied.
    StatusInflicted { target: CharacterId, status: StatusEffect },

    /// Two same-type plays completed a combo; the character gains +1 attack.
    ComboTriggered { character: CharacterId, card_type: CardType },

    /// A character's HP reached 0.
    CharacterDied { character: CharacterId },

    /// The combat ended.
    CombatEnd { outcome: Outcome },
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatEvent::RoundStart { round } => write!(f, "--- Round {} ---", round),
            CombatEvent::RoundEnd { round } => write!(f, "Round {} over", round),
            CombatEvent::CardAssigned { character, card } => {
                write!(f, "{} readies {}", character, card)
            }
            CombatEvent::AbilityUsed { caster, ability } => {
                write!(f, "{} uses {}!", caster, ability)
            }
            CombatEvent::InitiativeOrder { order } => {
                write!(f, "Initiative order: ")?;
                for (i, id) in order.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", id)?;
                }
                Ok(())
            }
            CombatEvent::DamageDealt {
                attacker,
                target,
                amount,
                remaining_hp,
            } => write!(
                f,
                "{} deals {} damage to {} ({} HP left)",
                attacker, amount, target, remaining_hp
            ),
            CombatEvent::StatusInflicted { target, status } => {
                write!(f, "{} suffers {}!", target, status)
            }
            CombatEvent::ComboTriggered { character, card_type } => {
                write!(f, "COMBO! {} gains +1 attack ({})", character, card_type)
            }
            CombatEvent::CharacterDied { character } => write!(f, "{} falls!", character),
            CombatEvent::CombatEnd { outcome } => write!(f, "Combat over: {}", outcome),
        }
    }
}
