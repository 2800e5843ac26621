//! Per-side combo bookkeeping.
//!
//! Each side accumulates a counter per card type across the whole combat.
//! Two cumulative plays of the same type (not necessarily in consecutive
//! rounds, not necessarily by the same character) fire a combo: the
//! character whose play completed it gains a permanent +1 attack modifier
//! and that type's counter resets to 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardType;

/// Plays of one card type needed to fire a combo.
pub const COMBO_THRESHOLD: u32 = 2;

/// Card-type play counters for one side.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComboTracker {
    counts: FxHashMap<CardType, u32>,
}

impl ComboTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one play of `card_type`.
    ///
    /// Returns `true` when the play completes a combo; the counter for
    /// that type resets to 0 in the same call.
    pub fn record(&mut self, card_type: CardType) -> bool {
        let count = self.counts.entry(card_type).or_insert(0);
        *count += 1;

        if *count >= COMBO_THRESHOLD {
            *count = 0;
            true
        } else {
            false
        }
    }

    /// Current counter for a card type.
    #[must_use]
    pub fn count(&self, card_type: CardType) -> u32 {
        self.counts.get(&card_type).copied().unwrap_or(0)
    }
}
