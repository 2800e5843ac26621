//! One-shot character abilities.

pub mod ability;

pub use ability::{Ability, AbilityKind};
