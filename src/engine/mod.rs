//! Combat engine: configuration, round state machine, events, and the
//! scripted opponent policy.
//!
//! ## Key Types
//!
//! - `CombatEngine`: owns the rosters, deck/hand, and round state machine
//! - `CombatConfig`: hand size, round limit, RNG seed
//! - `Phase` / `Progress`: persistent gates and the waiting-for result of
//!   each `advance` call
//! - `CombatEvent` / `Outcome`: the typed stream the adapter consumes
//! - `EngineError`: rejection taxonomy for invalid operations
//! - `CombatRng`: seeded deterministic randomness
//! - `ComboTracker`: per-side card-type combo counters

pub mod combo;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod phase;
pub mod rng;

pub use combo::{ComboTracker, COMBO_THRESHOLD};
pub use config::CombatConfig;
pub use engine::{base_hp, CombatEngine};
pub use error::EngineError;
pub use events::{CombatEvent, Outcome};
pub use phase::{Phase, Progress};
pub use rng::{CombatRng, CombatRngState};
