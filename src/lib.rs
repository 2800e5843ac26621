//! # cardclash
//!
//! A deterministic, turn-based card combat engine: two rosters of
//! characters, a shared shuffled deck, and a fixed number of rounds of
//! card selection, one-shot abilities, initiative display, pairwise
//! clashes, and status decay - ending in elimination or an HP-sum
//! decision.
//!
//! ## Design Principles
//!
//! 1. **Engine owns all state**: rosters, deck, hand, combo counters, and
//!    the round state machine live inside [`CombatEngine`]; hosts drive it
//!    through a small validated API and consume typed events.
//!
//! 2. **Cooperative, never blocking**: the two player-driven phases are
//!    gates, not callbacks. [`CombatEngine::advance`] runs as far as it can
//!    and reports what it is waiting for.
//!
//! 3. **Deterministic**: every random draw (deck shuffle, scripted
//!    opponent) flows through one seeded RNG, so a seed plus the player's
//!    inputs replays a combat exactly.
//!
//! ## Modules
//!
//! - `cards`: card definitions, status effects, and the catalog
//! - `abilities`: one-shot character abilities
//! - `character`: combatant state, rosters, and addressing
//! - `engine`: the combat state machine, events, and configuration

pub mod abilities;
pub mod cards;
pub mod character;
pub mod engine;

// Re-export commonly used types
pub use crate::cards::{Card, CardCatalog, CardId, CardType, StatusEffect};

pub use crate::abilities::{Ability, AbilityKind};

pub use crate::character::{Character, CharacterId, Roster, Side};

pub use crate::engine::{
    base_hp, CombatConfig, CombatEngine, CombatEvent, CombatRng, CombatRngState, ComboTracker,
    EngineError, Outcome, Phase, Progress, COMBO_THRESHOLD,
};
