//! Combatants and rosters.
//!
//! ## Key Types
//!
//! - `Character`: mutable per-combat state for one combatant
//! - `Roster`: fixed set of characters on one side
//! - `Side` / `CharacterId`: addressing for the engine API and events

pub mod character;
pub mod roster;

pub use character::Character;
pub use roster::{CharacterId, Roster, Side};
