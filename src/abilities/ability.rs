//! Ability definitions - one-shot character powers.
//!
//! Every character carries at most one unique [`Ability`], usable once per
//! combat. Activation mutates the caster (or, for `StatusInflict`, one
//! target) and permanently consumes the ability.
//!
//! ## Activation contract
//!
//! `activate` marks the caster's ability used unconditionally, even for a
//! `StatusInflict` with no target supplied - the activation is spent and
//! nothing else happens. Callers that want to refuse a target-less
//! inflict must check before activating.

use serde::{Deserialize, Serialize};

use crate::cards::StatusEffect;
use crate::character::Character;

/// What an ability does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Permanent attack modifier for the caster.
    DamageBoost,
    /// Permanent defense modifier for the caster.
    DefenseBoost,
    /// Restore caster HP, clamped to max.
    Heal,
    /// Apply a status effect to one target.
    StatusInflict,
    /// Raise the caster's initiative speed.
    SpeedBoost,
}

/// Immutable ability definition.
///
/// ## Example
///
/// ```
/// use cardclash::abilities::{Ability, AbilityKind};
///
/// let rage = Ability::new("Battle Rage", AbilityKind::DamageBoost, 2);
/// assert_eq!(rage.magnitude, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Ability name (for display/debugging).
    pub name: String,

    /// Effect category.
    pub kind: AbilityKind,

    /// Effect size: boost amount, heal amount, or speed gain.
    /// Ignored for `StatusInflict`.
    pub magnitude: i32,

    /// Status to apply for `StatusInflict`; `None` otherwise.
    pub inflict_status: StatusEffect,
}

impl Ability {
    /// Create a new ability.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AbilityKind, magnitude: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            magnitude,
            inflict_status: StatusEffect::None,
        }
    }

    /// Create a `StatusInflict` ability applying the given status.
    #[must_use]
    pub fn inflicting(name: impl Into<String>, status: StatusEffect) -> Self {
        Self {
            name: name.into(),
            kind: AbilityKind::StatusInflict,
            magnitude: 0,
            inflict_status: status,
        }
    }

    /// Activate this ability.
    ///
    /// Mutates the caster according to the ability kind; `StatusInflict`
    /// applies `inflict_status` to `target` when one is present. The
    /// caster's ability is marked used in every case.
    pub fn activate(&self, caster: &mut Character, target: Option<&mut Character>) {
        match self.kind {
            AbilityKind::DamageBoost => caster.temp_attack_mod += self.magnitude,
            AbilityKind::DefenseBoost => caster.temp_defense_mod += self.magnitude,
            AbilityKind::Heal => caster.heal(self.magnitude),
            AbilityKind::StatusInflict => {
                if let Some(target) = target {
                    target.apply_status(self.inflict_status);
                }
            }
            AbilityKind::SpeedBoost => caster.speed += self.magnitude,
        }

        caster.ability_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caster() -> Character {
        let mut c = Character::new("Caster", 3, None);
        c.reset(10);
        c
    }

    #[test]
    fn test_damage_boost() {
        let mut c = caster();
        Ability::new("Rage", AbilityKind::DamageBoost, 2).activate(&mut c, None);

        assert_eq!(c.temp_attack_mod, 2);
        assert!(c.ability_used);
    }

    #[test]
    fn test_defense_boost() {
        let mut c = caster();
        Ability::new("Guard", AbilityKind::DefenseBoost, 1).activate(&mut c, None);

        assert_eq!(c.temp_defense_mod, 1);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut c = caster();
        c.take_damage(3);
        Ability::new("Mend", AbilityKind::Heal, 10).activate(&mut c, None);

        assert_eq!(c.current_hp, c.max_hp);
    }

    #[test]
    fn test_speed_boost() {
        let mut c = caster();
        Ability::new("Haste", AbilityKind::SpeedBoost, 4).activate(&mut c, None);

        assert_eq!(c.speed, 7);
    }

    #[test]
    fn test_status_inflict_hits_target() {
        let mut c = caster();
        let mut victim = caster();
        Ability::inflicting("Frostbite", StatusEffect::Ice).activate(&mut c, Some(&mut victim));

        assert_eq!(victim.status, StatusEffect::Ice);
        assert!(!victim.can_use_ability);
        assert!(c.ability_used);
        assert!(!victim.ability_used);
    }

    #[test]
    fn test_status_inflict_without_target_still_consumes() {
        let mut c = caster();
        Ability::inflicting("Frostbite", StatusEffect::Ice).activate(&mut c, None);

        assert!(c.ability_used);
        assert_eq!(c.status, StatusEffect::None);
    }

    #[test]
    fn test_ability_serialization() {
        let ability = Ability::inflicting("Venom", StatusEffect::Poison);

        let json = serde_json::to_string(&ability).unwrap();
        let deserialized: Ability = serde_json::from_str(&json).unwrap();

        assert_eq!(ability, deserialized);
    }
}
