//! Combat configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one combat.
///
/// ## Example
///
/// ```
/// use cardclash::engine::CombatConfig;
///
/// let config = CombatConfig::new().with_max_rounds(3).with_seed(7);
/// assert_eq!(config.max_rounds, 3);
/// assert_eq!(config.hand_size, 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Cards dealt to the player's hand at combat start. If the deck is
    /// smaller, the hand is simply the whole deck.
    pub hand_size: usize,

    /// Rounds before the combat falls back to the HP-sum decision.
    pub max_rounds: u32,

    /// RNG seed for the deck shuffle and the scripted opponent.
    pub seed: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hand_size: 10,
            max_rounds: 5,
            seed: 0,
        }
    }
}

impl CombatConfig {
    /// Create a config with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand size (builder pattern).
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the round limit (builder pattern).
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        assert!(max_rounds > 0, "Combat must last at least one round");
        self.max_rounds = max_rounds;
        self
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
