//! Per-combat character state.
//!
//! A `Character` is the mutable record for one combatant over the lifetime
//! of a single combat: current HP, initiative speed, the one-shot ability
//! slot, the active status effect, temporary modifiers, and the card
//! assigned for the current round.
//!
//! ## Death
//!
//! `alive` flips to false the moment `current_hp` reaches 0 and never flips
//! back: dead characters are excluded from card assignment, ability
//! activation, and combat pairing, but stay in their roster so their 0 HP
//! still counts toward the end-of-combat HP sum.

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::cards::{CardCatalog, CardId, StatusEffect};

/// Mutable state for one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,

    /// Maximum HP, fixed at combat start from the roster-size table.
    pub max_hp: i32,

    /// Current HP, always within `[0, max_hp]`.
    pub current_hp: i32,

    /// Initiative key; higher acts earlier in the displayed ordering.
    pub speed: i32,

    /// False once `current_hp` hits 0, permanently for this combat.
    pub alive: bool,

    /// Unique one-shot ability, if the character has one.
    pub ability: Option<Ability>,

    /// Set once the ability has been activated; never cleared mid-combat.
    pub ability_used: bool,

    /// Active status effect (`None` when unaffected).
    pub status: StatusEffect,

    /// Rounds the status has left (0 or 1).
    pub status_duration: u8,

    /// Card assigned for the current round, cleared at round start.
    pub assigned_card: Option<CardId>,

    /// Temporary attack modifier (combos, boosts, Poison).
    pub temp_attack_mod: i32,

    /// Temporary defense modifier (boosts, Fire).
    pub temp_defense_mod: i32,

    /// False only while Ice is active.
    pub can_use_ability: bool,
}

impl Character {
    /// Create a character shell.
    ///
    /// HP is zero until [`reset`](Self::reset) is called - the engine
    /// derives HP from the roster size at combat start, not from the
    /// character itself.
    #[must_use]
    pub fn new(name: impl Into<String>, speed: i32, ability: Option<Ability>) -> Self {
        Self {
            name: name.into(),
            max_hp: 0,
            current_hp: 0,
            speed,
            alive: true,
            ability,
            ability_used: false,
            status: StatusEffect::None,
            status_duration: 0,
            assigned_card: None,
            temp_attack_mod: 0,
            temp_defense_mod: 0,
            can_use_ability: true,
        }
    }

    /// Reset to combat-start state with the given base HP.
    pub fn reset(&mut self, base_hp: i32) {
        self.max_hp = base_hp;
        self.current_hp = base_hp;
        self.alive = true;
        self.ability_used = false;
        self.status = StatusEffect::None;
        self.status_duration = 0;
        self.assigned_card = None;
        self.temp_attack_mod = 0;
        self.temp_defense_mod = 0;
        self.can_use_ability = true;
    }

    /// Apply damage, clamping HP to 0 and flipping `alive` at 0.
    ///
    /// `amount` must be non-negative; attackers compute
    /// `max(0, attack - defense)` before calling.
    pub fn take_damage(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "damage must be non-negative");
        self.current_hp -= amount;
        if self.current_hp <= 0 {
            self.current_hp = 0;
            self.alive = false;
        }
    }

    /// Restore HP, clamped to `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "heal must be non-negative");
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    /// Apply a status effect, overwriting any existing one.
    ///
    /// Duration is always one round. Side effects by kind:
    /// Fire sets `temp_defense_mod = -1`, Poison sets
    /// `temp_attack_mod = -1`, Ice seals abilities. Modifiers are
    /// overwritten, not summed - statuses are exclusive.
    pub fn apply_status(&mut self, effect: StatusEffect) {
        match effect {
            StatusEffect::None => return,
            StatusEffect::Fire => self.temp_defense_mod = -1,
            StatusEffect::Poison => self.temp_attack_mod = -1,
            StatusEffect::Ice => self.can_use_ability = false,
        }

        self.status = effect;
        self.status_duration = 1;
    }

    /// Tick the active status down one round.
    ///
    /// Runs once per round after combat resolution. When the duration
    /// reaches 0 the status clears and the temporary modifiers and ability
    /// seal return to neutral.
    pub fn update_status(&mut self) {
        if self.status_duration > 0 {
            self.status_duration -= 1;
            if self.status_duration == 0 {
                self.clear_status();
            }
        }
    }

    fn clear_status(&mut self) {
        self.status = StatusEffect::None;
        self.temp_attack_mod = 0;
        self.temp_defense_mod = 0;
        self.can_use_ability = true;
    }

    /// Effective attack this round: card attack plus modifier, 0 with no
    /// card assigned.
    #[must_use]
    pub fn total_attack(&self, catalog: &CardCatalog) -> i32 {
        match self.assigned_card {
            Some(id) => catalog.get_unchecked(id).attack + self.temp_attack_mod,
            None => 0,
        }
    }

    /// Effective defense this round: card defense plus modifier, 0 with no
    /// card assigned.
    #[must_use]
    pub fn total_defense(&self, catalog: &CardCatalog) -> i32 {
        match self.assigned_card {
            Some(id) => catalog.get_unchecked(id).defense + self.temp_defense_mod,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardType};
    use proptest::prelude::*;

    fn combatant() -> Character {
        let mut c = Character::new("Test", 3, None);
        c.reset(10);
        c
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = combatant();
        c.take_damage(4);
        assert_eq!(c.current_hp, 6);
        assert!(c.alive);

        c.take_damage(100);
        assert_eq!(c.current_hp, 0);
        assert!(!c.alive);
    }

    #[test]
    fn test_death_is_permanent_across_status_updates() {
        let mut c = combatant();
        c.take_damage(10);
        assert!(!c.alive);

        c.update_status();
        c.update_status();
        assert!(!c.alive);
        assert_eq!(c.current_hp, 0);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut c = combatant();
        c.take_damage(5);
        c.heal(3);
        assert_eq!(c.current_hp, 8);

        c.heal(100);
        assert_eq!(c.current_hp, 10);
    }

    #[test]
    fn test_status_lifecycle() {
        let mut c = combatant();
        c.apply_status(StatusEffect::Fire);

        assert_eq!(c.status, StatusEffect::Fire);
        assert_eq!(c.status_duration, 1);
        assert_eq!(c.temp_defense_mod, -1);

        c.update_status();

        assert_eq!(c.status, StatusEffect::None);
        assert_eq!(c.status_duration, 0);
        assert_eq!(c.temp_defense_mod, 0);
        assert!(c.can_use_ability);
    }

    #[test]
    fn test_poison_lowers_attack() {
        let mut c = combatant();
        c.apply_status(StatusEffect::Poison);
        assert_eq!(c.temp_attack_mod, -1);
    }

    #[test]
    fn test_ice_seals_ability() {
        let mut c = combatant();
        c.apply_status(StatusEffect::Ice);
        assert!(!c.can_use_ability);

        c.update_status();
        assert!(c.can_use_ability);
    }

    #[test]
    fn test_status_overwrites_previous() {
        let mut c = combatant();
        c.apply_status(StatusEffect::Fire);
        c.apply_status(StatusEffect::Poison);

        assert_eq!(c.status, StatusEffect::Poison);
        assert_eq!(c.temp_attack_mod, -1);
        // Fire's modifier lingers until the status expires; statuses are
        // exclusive, modifiers are not merged.
        assert_eq!(c.temp_defense_mod, -1);

        c.update_status();
        assert_eq!(c.temp_attack_mod, 0);
        assert_eq!(c.temp_defense_mod, 0);
    }

    #[test]
    fn test_apply_none_is_noop() {
        let mut c = combatant();
        c.apply_status(StatusEffect::None);
        assert_eq!(c.status_duration, 0);
    }

    #[test]
    fn test_totals_without_card_are_zero() {
        let catalog = CardCatalog::new();
        let mut c = combatant();
        c.temp_attack_mod = 3;

        assert_eq!(c.total_attack(&catalog), 0);
        assert_eq!(c.total_defense(&catalog), 0);
    }

    #[test]
    fn test_totals_with_card_and_modifiers() {
        let mut catalog = CardCatalog::new();
        let id = catalog.register_auto(Card::new("Blade", CardType::Melee, 4, 2));

        let mut c = combatant();
        c.assigned_card = Some(id);
        c.temp_attack_mod = 1;
        c.temp_defense_mod = -1;

        assert_eq!(c.total_attack(&catalog), 5);
        assert_eq!(c.total_defense(&catalog), 1);
    }

    #[test]
    fn test_reset_restores_combat_start_state() {
        let mut c = combatant();
        c.take_damage(10);
        c.ability_used = true;
        c.apply_status(StatusEffect::Ice);

        c.reset(8);

        assert_eq!(c.max_hp, 8);
        assert_eq!(c.current_hp, 8);
        assert!(c.alive);
        assert!(!c.ability_used);
        assert_eq!(c.status, StatusEffect::None);
        assert!(c.can_use_ability);
    }

    #[test]
    fn test_character_serialization() {
        let mut c = combatant();
        c.apply_status(StatusEffect::Fire);

        let json = serde_json::to_string(&c).unwrap();
        let deserialized: Character = serde_json::from_str(&json).unwrap();

        assert_eq!(c, deserialized);
    }

    proptest! {
        #[test]
        fn prop_hp_stays_in_bounds(damages in proptest::collection::vec(0i32..50, 0..20)) {
            let mut c = combatant();
            for d in damages {
                c.take_damage(d);
                prop_assert!(c.current_hp >= 0);
                prop_assert!(c.current_hp <= c.max_hp);
                prop_assert_eq!(c.alive, c.current_hp > 0);
            }
        }

        #[test]
        fn prop_heal_never_exceeds_max(damage in 0i32..20, heals in proptest::collection::vec(0i32..20, 0..10)) {
            let mut c = combatant();
            c.take_damage(damage);
            for h in heals {
                c.heal(h);
                prop_assert!(c.current_hp <= c.max_hp);
            }
        }
    }
}
