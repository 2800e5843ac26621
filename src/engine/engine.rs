//! The combat engine: round state machine and resolution.
//!
//! ## Round structure
//!
//! `CardSelection -> Abilities -> initiative -> clashes -> status decay ->
//! victory check`, repeating until one side is wiped or the round limit is
//! reached. The two leading phases are gated on the external caller (the
//! presentation adapter); everything after the second gate resolves
//! atomically inside one [`advance`](CombatEngine::advance) call.
//!
//! ## Driving the engine
//!
//! ```
//! use cardclash::cards::{Card, CardCatalog, CardType};
//! use cardclash::character::{Character, CharacterId, Roster};
//! use cardclash::engine::{CombatConfig, CombatEngine, Progress};
//!
//! let mut catalog = CardCatalog::new();
//! let strike = catalog.register_auto(Card::new("Strike", CardType::Melee, 2, 0));
//!
//! let player = Roster::new(vec![Character::new("Hero", 3, None)]);
//! let opponent = Roster::new(vec![Character::new("Bandit", 2, None)]);
//!
//! let mut engine = CombatEngine::new(
//!     CombatConfig::new().with_max_rounds(1),
//!     player,
//!     opponent,
//!     vec![strike; 8],
//!     catalog,
//! )
//! .unwrap();
//!
//! assert_eq!(engine.advance(), Progress::AwaitingCards);
//! engine.assign_card(CharacterId::player(0), strike).unwrap();
//! assert_eq!(engine.advance(), Progress::AwaitingAbilities);
//! engine.finish_ability_phase().unwrap();
//! let finished = engine.advance();
//! assert!(matches!(finished, Progress::Finished(_)));
//! ```
//!
//! ## Scripted opponent
//!
//! The opponent side is driven by a fixed policy: each living opponent is
//! assigned a uniformly random card from the full deck (the opponent is not
//! hand-limited), and each living opponent with an unused, unsealed ability
//! activates it with 50% probability against the first living player
//! character. Both draws come from the engine's seeded RNG, so a fixed seed
//! plus identical player inputs reproduces a combat exactly.

use im::Vector;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::abilities::AbilityKind;
use crate::cards::{CardCatalog, CardId, StatusEffect};
use crate::character::{Character, CharacterId, Roster, Side};
use crate::engine::combo::ComboTracker;
use crate::engine::config::CombatConfig;
use crate::engine::error::EngineError;
use crate::engine::events::{CombatEvent, Outcome};
use crate::engine::phase::{Phase, Progress};
use crate::engine::rng::CombatRng;

/// Base HP per character, determined by roster size.
///
/// Larger rosters fight with shallower health pools so combats stay within
/// the round limit.
#[must_use]
pub const fn base_hp(roster_size: usize) -> i32 {
    match roster_size {
        1 => 10,
        2 => 8,
        3 => 7,
        4 => 6,
        _ => 10,
    }
}

/// Turn-based card combat between two rosters sharing one deck.
///
/// All mutation of combat state happens inside the engine; the external
/// caller supplies card assignments and ability activations for the player
/// side and consumes [`CombatEvent`]s.
#[derive(Debug)]
pub struct CombatEngine {
    config: CombatConfig,
    catalog: CardCatalog,

    player: Roster,
    opponent: Roster,

    /// Full shuffled card pool. The scripted opponent draws from here.
    deck: Vec<CardId>,
    /// Player-assignable subset, dealt once at combat start.
    hand: Vec<CardId>,

    round: u32,
    phase: Phase,
    ability_phase_done: bool,
    outcome: Option<Outcome>,

    player_combos: ComboTracker,
    opponent_combos: ComboTracker,

    rng: CombatRng,

    /// Events not yet drained by the adapter.
    pending: Vec<CombatEvent>,
    /// Every event since combat start, in order.
    history: Vector<CombatEvent>,
}

impl CombatEngine {
    /// Set up a combat: validate inputs, reset both rosters to full HP per
    /// the roster-size table, shuffle the deck, and deal the hand.
    ///
    /// The player roster's size selects the base HP applied to both sides.
    pub fn new(
        config: CombatConfig,
        player: Roster,
        opponent: Roster,
        deck: Vec<CardId>,
        catalog: CardCatalog,
    ) -> Result<Self, EngineError> {
        if player.is_empty() {
            return Err(EngineError::EmptyRoster(Side::Player));
        }
        if opponent.is_empty() {
            return Err(EngineError::EmptyRoster(Side::Opponent));
        }
        if deck.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        for &card in &deck {
            if !catalog.contains(card) {
                return Err(EngineError::UnknownCard(card));
            }
        }

        let mut engine = Self {
            rng: CombatRng::new(config.seed),
            config,
            catalog,
            player,
            opponent,
            deck,
            hand: Vec::new(),
            round: 0,
            phase: Phase::CardSelection,
            ability_phase_done: false,
            outcome: None,
            player_combos: ComboTracker::new(),
            opponent_combos: ComboTracker::new(),
            pending: Vec::new(),
            history: Vector::new(),
        };

        let hp = base_hp(engine.player.len());
        for character in engine.player.iter_mut().chain(engine.opponent.iter_mut()) {
            character.reset(hp);
        }

        engine.rng.shuffle(&mut engine.deck);
        let dealt = engine.config.hand_size.min(engine.deck.len());
        engine.hand = engine.deck[..dealt].to_vec();

        debug!(
            "combat start: {}v{}, {} HP each, {} cards dealt",
            engine.player.len(),
            engine.opponent.len(),
            hp,
            dealt
        );

        engine.begin_round(1);
        Ok(engine)
    }

    // === External driving calls ===

    /// Assign a card from the hand to a living player-side character.
    ///
    /// Valid only during card selection. The card leaves the hand.
    pub fn assign_card(&mut self, id: CharacterId, card: CardId) -> Result<(), EngineError> {
        match self.phase {
            Phase::CardSelection => {}
            Phase::Finished => return Err(EngineError::CombatOver),
            other => return Err(EngineError::WrongPhase(other)),
        }
        if id.side != Side::Player {
            return Err(EngineError::NotPlayerSide(id));
        }

        let character = self
            .player
            .get(id.index)
            .ok_or(EngineError::UnknownCharacter(id))?;
        if !character.alive {
            return Err(EngineError::DeadCharacter(id));
        }
        if character.assigned_card.is_some() {
            return Err(EngineError::CardAlreadyAssigned(id));
        }

        let slot = self
            .hand
            .iter()
            .position(|&c| c == card)
            .ok_or(EngineError::CardNotInHand(card))?;

        self.hand.remove(slot);
        if let Some(character) = self.player.get_mut(id.index) {
            character.assigned_card = Some(card);
        }
        self.push_event(CombatEvent::CardAssigned { character: id, card });
        Ok(())
    }

    /// Activate a living player-side character's unique ability.
    ///
    /// Valid only during the ability phase, for an unused, unsealed
    /// ability. `StatusInflict` abilities want a living target; passing
    /// none silently consumes the activation (the reference behavior).
    pub fn activate_ability(
        &mut self,
        caster: CharacterId,
        target: Option<CharacterId>,
    ) -> Result<(), EngineError> {
        match self.phase {
            Phase::Abilities => {}
            Phase::Finished => return Err(EngineError::CombatOver),
            other => return Err(EngineError::WrongPhase(other)),
        }
        if caster.side != Side::Player {
            return Err(EngineError::NotPlayerSide(caster));
        }

        let character = self
            .player
            .get(caster.index)
            .ok_or(EngineError::UnknownCharacter(caster))?;
        if !character.alive {
            return Err(EngineError::DeadCharacter(caster));
        }
        if character.ability.is_none() {
            return Err(EngineError::NoAbility(caster));
        }
        if character.ability_used {
            return Err(EngineError::AbilityAlreadyUsed(caster));
        }
        if !character.can_use_ability {
            return Err(EngineError::AbilitySealed(caster));
        }

        if let Some(target) = target {
            let targeted = self
                .character(target)
                .ok_or(EngineError::UnknownCharacter(target))?;
            if !targeted.alive {
                return Err(EngineError::DeadCharacter(target));
            }
        }

        self.run_activation(caster, target);
        Ok(())
    }

    /// Flip the ability-phase gate; `advance` resolves the rest of the
    /// round on its next call.
    pub fn finish_ability_phase(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Abilities => {
                self.ability_phase_done = true;
                Ok(())
            }
            Phase::Finished => Err(EngineError::CombatOver),
            other => Err(EngineError::WrongPhase(other)),
        }
    }

    /// Run the state machine as far as the gates allow.
    ///
    /// Never blocks: returns what the engine is waiting for, that a round
    /// completed, or the final outcome (idempotently once finished).
    pub fn advance(&mut self) -> Progress {
        loop {
            match self.phase {
                Phase::Finished => {
                    let outcome = self.outcome.expect("finished combat has an outcome");
                    return Progress::Finished(outcome);
                }
                Phase::CardSelection => {
                    if !self.player_cards_ready() {
                        return Progress::AwaitingCards;
                    }
                    self.scripted_card_assignment();
                    self.phase = Phase::Abilities;
                    trace!("round {}: entering ability phase", self.round);
                }
                Phase::Abilities => {
                    if !self.ability_phase_done {
                        return Progress::AwaitingAbilities;
                    }
                    self.scripted_ability_rolls();
                    self.resolve_initiative();
                    self.resolve_clashes();
                    self.decay_statuses();

                    if let Some(outcome) = self.evaluate_victory() {
                        self.phase = Phase::Finished;
                        self.outcome = Some(outcome);
                        self.push_event(CombatEvent::CombatEnd { outcome });
                        debug!("combat over after round {}: {:?}", self.round, outcome);
                        return Progress::Finished(outcome);
                    }

                    let finished = self.round;
                    self.push_event(CombatEvent::RoundEnd { round: finished });
                    self.begin_round(finished + 1);
                    return Progress::RoundComplete { round: finished };
                }
            }
        }
    }

    // === Accessors ===

    /// Current persistent phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round number (1-based).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The combat's configuration.
    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Cards still assignable by the player.
    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    /// The full shuffled deck (the scripted opponent's pool).
    #[must_use]
    pub fn deck(&self) -> &[CardId] {
        &self.deck
    }

    /// Card definitions for this combat.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Resolve a character address.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        match id.side {
            Side::Player => self.player.get(id.index),
            Side::Opponent => self.opponent.get(id.index),
        }
    }

    /// One side's roster.
    #[must_use]
    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// The final outcome, once the combat has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Every event since combat start. O(1) to clone.
    #[must_use]
    pub fn history(&self) -> &Vector<CombatEvent> {
        &self.history
    }

    // === Round internals ===

    fn push_event(&mut self, event: CombatEvent) {
        self.history.push_back(event.clone());
        self.pending.push(event);
    }

    fn begin_round(&mut self, round: u32) {
        self.round = round;
        self.phase = Phase::CardSelection;
        self.ability_phase_done = false;
        for character in self.player.iter_mut().chain(self.opponent.iter_mut()) {
            character.assigned_card = None;
        }
        self.push_event(CombatEvent::RoundStart { round });
    }

    fn player_cards_ready(&self) -> bool {
        self.player
            .iter()
            .filter(|c| c.alive)
            .all(|c| c.assigned_card.is_some())
    }

    /// Scripted policy: every living opponent gets a uniformly random card
    /// from the full deck. The deck is not consumed.
    fn scripted_card_assignment(&mut self) {
        for index in self.opponent.alive_indices() {
            let Some(&card) = self.rng.choose(&self.deck) else {
                return;
            };
            if let Some(character) = self.opponent.get_mut(index) {
                character.assigned_card = Some(card);
            }
            trace!("scripted pick for opponent #{}: {}", index, card);
            self.push_event(CombatEvent::CardAssigned {
                character: CharacterId::opponent(index),
                card,
            });
        }
    }

    /// Scripted policy: 50% roll per eligible opponent to activate their
    /// ability against the first living player character. The roll is
    /// consumed even for characters with no ability configured.
    fn scripted_ability_rolls(&mut self) {
        let eligible: Vec<usize> = self
            .opponent
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive && !c.ability_used && c.can_use_ability)
            .map(|(i, _)| i)
            .collect();

        for index in eligible {
            if !self.rng.gen_bool(0.5) {
                continue;
            }
            if self.opponent.get(index).and_then(|c| c.ability.as_ref()).is_none() {
                continue;
            }

            let target = self
                .player
                .alive_indices()
                .first()
                .copied()
                .map(CharacterId::player);
            debug!("scripted ability from opponent #{} at {:?}", index, target);
            self.run_activation(CharacterId::opponent(index), target);
        }
    }

    /// Activate a validated caster's ability, handling roster borrows.
    fn run_activation(&mut self, caster_id: CharacterId, target_id: Option<CharacterId>) {
        let Some(ability) = self.character(caster_id).and_then(|c| c.ability.clone()) else {
            return;
        };

        match target_id {
            None => {
                if let Some(caster) = self.character_mut(caster_id) {
                    ability.activate(caster, None);
                }
            }
            Some(target_id) if target_id == caster_id => {
                // Self-targeted inflict: apply inline, the borrow cannot
                // alias.
                if let Some(caster) = self.character_mut(caster_id) {
                    if ability.kind == AbilityKind::StatusInflict {
                        caster.apply_status(ability.inflict_status);
                        caster.ability_used = true;
                    } else {
                        ability.activate(caster, None);
                    }
                }
            }
            Some(target_id) => {
                if let Some((caster, target)) = self.pair_mut(caster_id, target_id) {
                    ability.activate(caster, Some(target));
                }
            }
        }

        self.push_event(CombatEvent::AbilityUsed {
            caster: caster_id,
            ability: ability.name,
        });
    }

    fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        match id.side {
            Side::Player => self.player.get_mut(id.index),
            Side::Opponent => self.opponent.get_mut(id.index),
        }
    }

    fn pair_mut(
        &mut self,
        a: CharacterId,
        b: CharacterId,
    ) -> Option<(&mut Character, &mut Character)> {
        match (a.side, b.side) {
            (Side::Player, Side::Opponent) => {
                Some((self.player.get_mut(a.index)?, self.opponent.get_mut(b.index)?))
            }
            (Side::Opponent, Side::Player) => {
                Some((self.opponent.get_mut(a.index)?, self.player.get_mut(b.index)?))
            }
            (Side::Player, Side::Player) => self.player.pair_mut(a.index, b.index),
            (Side::Opponent, Side::Opponent) => self.opponent.pair_mut(a.index, b.index),
        }
    }

    /// Speed-descending ordering of all living characters. Stable: ties
    /// keep player-roster-then-index order. Informational only - clash
    /// pairing below is positional.
    fn resolve_initiative(&mut self) {
        let mut ranked: Vec<(CharacterId, i32)> = Vec::new();
        for (index, character) in self.player.iter().enumerate().filter(|(_, c)| c.alive) {
            ranked.push((CharacterId::player(index), character.speed));
        }
        for (index, character) in self.opponent.iter().enumerate().filter(|(_, c)| c.alive) {
            ranked.push((CharacterId::opponent(index), character.speed));
        }

        ranked.sort_by_key(|&(_, speed)| std::cmp::Reverse(speed));

        let order: SmallVec<[CharacterId; 8]> = ranked.into_iter().map(|(id, _)| id).collect();
        self.push_event(CombatEvent::InitiativeOrder { order });
    }

    /// Pair living characters by filtered-alive position and resolve each
    /// clash in order.
    fn resolve_clashes(&mut self) {
        let player_alive = self.player.alive_indices();
        let opponent_alive = self.opponent.alive_indices();
        let pairs = player_alive.len().min(opponent_alive.len());

        for k in 0..pairs {
            self.resolve_clash(player_alive[k], opponent_alive[k]);
        }
    }

    fn resolve_clash(&mut self, player_index: usize, opponent_index: usize) {
        let a = CharacterId::player(player_index);
        let b = CharacterId::opponent(opponent_index);

        self.strike(a, b);

        // The counterattack is skipped entirely when the opening strike
        // was lethal.
        if self.character(b).is_some_and(|c| c.alive) {
            self.strike(b, a);
        }

        self.record_combo(a);
        self.record_combo(b);
    }

    /// One attack: damage is `max(0, attack - defense)`, then the
    /// attacker's card status (if any) lands on the defender - even a dead
    /// one.
    fn strike(&mut self, attacker_id: CharacterId, defender_id: CharacterId) {
        let Some(attacker) = self.character(attacker_id) else {
            return;
        };
        let attack = attacker.total_attack(&self.catalog);
        let status = attacker
            .assigned_card
            .map_or(StatusEffect::None, |card| {
                self.catalog.get_unchecked(card).status_effect
            });

        let Some(defender) = self.character(defender_id) else {
            return;
        };
        let defense = defender.total_defense(&self.catalog);
        let damage = (attack - defense).max(0);

        let Some(defender) = self.character_mut(defender_id) else {
            return;
        };
        let was_alive = defender.alive;
        defender.take_damage(damage);
        let remaining_hp = defender.current_hp;
        let died = was_alive && !defender.alive;

        trace!(
            "{} strikes {} for {} ({} vs {})",
            attacker_id,
            defender_id,
            damage,
            attack,
            defense
        );
        self.push_event(CombatEvent::DamageDealt {
            attacker: attacker_id,
            target: defender_id,
            amount: damage,
            remaining_hp,
        });
        if died {
            self.push_event(CombatEvent::CharacterDied {
                character: defender_id,
            });
        }

        if status.is_some() {
            if let Some(defender) = self.character_mut(defender_id) {
                defender.apply_status(status);
            }
            self.push_event(CombatEvent::StatusInflicted {
                target: defender_id,
                status,
            });
        }
    }

    /// Book a card play against the side's combo counters; a completed
    /// combo grants the character a permanent +1 attack modifier.
    fn record_combo(&mut self, id: CharacterId) {
        let Some(card_type) = self
            .character(id)
            .and_then(|c| c.assigned_card)
            .map(|card| self.catalog.get_unchecked(card).card_type)
        else {
            return;
        };

        let tracker = match id.side {
            Side::Player => &mut self.player_combos,
            Side::Opponent => &mut self.opponent_combos,
        };

        if tracker.record(card_type) {
            if let Some(character) = self.character_mut(id) {
                character.temp_attack_mod += 1;
            }
            debug!("combo for {} on {}", id, card_type);
            self.push_event(CombatEvent::ComboTriggered { character: id, card_type });
        }
    }

    fn decay_statuses(&mut self) {
        for character in self
            .player
            .iter_mut()
            .chain(self.opponent.iter_mut())
            .filter(|c| c.alive)
        {
            character.update_status();
        }
    }

    /// Elimination first (a simultaneous wipe is a player loss), then the
    /// HP-sum fallback at the round limit. Ties go to the opponent: the
    /// player wins only with strictly greater total HP.
    fn evaluate_victory(&self) -> Option<Outcome> {
        if self.player.all_dead() {
            return Some(Outcome::OpponentVictory);
        }
        if self.opponent.all_dead() {
            return Some(Outcome::PlayerVictory);
        }

        if self.round >= self.config.max_rounds {
            let player_hp = self.player.total_hp();
            let opponent_hp = self.opponent.total_hp();
            debug!(
                "round limit reached: player {} HP vs opponent {} HP",
                player_hp, opponent_hp
            );
            return Some(if player_hp > opponent_hp {
                Outcome::PlayerVictory
            } else {
                Outcome::OpponentVictory
            });
        }

        None
    }
}
