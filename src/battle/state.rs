//! The battle state machine.
//!
//! ## Phases
//!
//! `Setup → InProgress → Resolved`. A battle is created in `Setup`;
//! [`Battle::start`] validates both decks, shuffles them, draws the lane
//! effects and deals the opening hands. In `InProgress` both sides commit
//! cards face-down with [`Battle::play_card`] (or
//! [`Battle::play_vibefid`] to pick a combo) and [`Battle::sacrifice`],
//! then [`Battle::end_turn`] fires skip triggers, recomputes the board,
//! refills energy and draws.
//! The battle resolves at the turn limit, when a side runs out of cards,
//! or on an explicit [`Battle::resolve`].
//!
//! ## Atomicity
//!
//! Every precondition of a play is checked before anything is touched. A
//! rejected play leaves hand, energy, lanes and log exactly as they were.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::lane::{Committed, Lane};
use super::log::{BattleLog, LogAction};
use super::outcome::{BattleOutcome, LaneTally};
use super::view::BattleView;
use super::Phase;
use crate::cards::{Card, CardCatalog, CardId, CardKind};
use crate::core::{
    BattleConfig, EngineError, EngineResult, GameRng, IllegalPlay, Side, SideMap, LANE_COUNT,
};
use crate::rules::{validate_deck, Resolver, RevealEvent};

/// One match between the player and the CPU.
#[derive(Clone, Debug)]
pub struct Battle<C> {
    config: BattleConfig,
    resolver: Resolver<C>,
    phase: Phase,
    turn: u32,
    lanes: [Lane; LANE_COUNT],
    hands: SideMap<Vec<Card>>,
    decks: SideMap<VecDeque<Card>>,
    energy: SideMap<u32>,
    plays_this_turn: SideMap<u32>,
    next_sequence: u32,
    /// Random targets for on-reveal effects.
    rng: GameRng,
    log: BattleLog,
    outcome: Option<BattleOutcome>,
}

impl<C: CardCatalog> Battle<C> {
    /// Create a battle in `Setup`.
    pub fn new(catalog: C, config: BattleConfig) -> EngineResult<Self> {
        config.validate()?;
        let resolver = Resolver::new(catalog, &config);
        Ok(Self {
            config,
            resolver,
            phase: Phase::Setup,
            turn: 1,
            lanes: std::array::from_fn(Lane::new),
            hands: SideMap::default(),
            decks: SideMap::default(),
            energy: SideMap::default(),
            plays_this_turn: SideMap::default(),
            next_sequence: 0,
            rng: GameRng::new(0),
            log: BattleLog::new(),
            outcome: None,
        })
    }

    /// Create and start a battle in one step.
    pub fn setup(
        catalog: C,
        config: BattleConfig,
        player_deck: Vec<Card>,
        cpu_deck: Vec<Card>,
        rng: &GameRng,
    ) -> EngineResult<Self> {
        let mut battle = Self::new(catalog, config)?;
        battle.start(player_deck, cpu_deck, rng)?;
        Ok(battle)
    }

    /// Validate decks, shuffle, draw lane effects, deal opening hands and
    /// enter `InProgress`.
    ///
    /// Nothing changes if either deck is rejected.
    pub fn start(&mut self, player_deck: Vec<Card>, cpu_deck: Vec<Card>, rng: &GameRng) -> EngineResult<()> {
        if self.phase != Phase::Setup {
            return Err(EngineError::InvalidStateTransition {
                operation: "start",
                phase: self.phase,
            });
        }

        let decks = SideMap::from_pair(player_deck, cpu_deck);
        for (side, deck) in decks.iter() {
            self.check_deck(side, deck)?;
        }

        let effects = self.config.lanes.draw(&mut rng.for_context("lanes"));
        self.lanes = std::array::from_fn(|i| Lane::with_effect(i, effects[i]));
        self.rng = rng.for_context("reveal");

        for side in Side::BOTH {
            let mut cards = decks[side].clone();
            rng.for_context(&format!("deck-{side}")).shuffle(&mut cards);
            self.decks[side] = cards.into();
            for _ in 0..self.config.opening_hand {
                self.draw(side);
            }
            self.energy[side] = self.config.energy_for_turn(1);
        }

        self.phase = Phase::InProgress;
        info!(
            seed = rng.seed(),
            total_turns = self.config.total_turns,
            lanes = ?effects.map(|e| e.name()),
            "battle started"
        );
        Ok(())
    }

    /// Commit a card from `side`'s hand to a lane.
    ///
    /// On-reveal effects fire immediately; lane powers are recomputed
    /// afterwards.
    pub fn play_card(&mut self, side: Side, card_id: &CardId, lane: usize) -> EngineResult<()> {
        self.commit(side, card_id, lane, None)
    }

    /// Commit a VibeFID card for a specific combo.
    ///
    /// The lane side's active combo is then picked among the chosen ones
    /// (see [`Resolver::active_combo`]).
    pub fn play_vibefid(&mut self, side: Side, card_id: &CardId, lane: usize, combo_id: &str) -> EngineResult<()> {
        self.commit(side, card_id, lane, Some(combo_id))
    }

    fn commit(&mut self, side: Side, card_id: &CardId, lane: usize, combo: Option<&str>) -> EngineResult<()> {
        self.ensure_in_progress("play_card")?;

        let checked = self
            .check_play(side, card_id, lane)
            .and_then(|checked| self.check_choice(side, checked.0, combo).map(|()| checked));
        let (position, cost) = match checked {
            Ok(checked) => checked,
            Err(rejection) => {
                debug!(%side, %card_id, lane, reason = %rejection, "play rejected");
                return Err(rejection.into());
            }
        };

        let card = self.hands[side].remove(position);
        self.energy[side] -= cost;

        self.log.record(
            self.turn,
            Some(side),
            LogAction::Play {
                card_id: card.id.clone(),
                lane,
                cost,
            },
        );
        debug!(%side, card_id = %card.id, lane, cost, combo = ?combo, energy = self.energy[side], "card played");

        let sequence = self.next_sequence;
        let mut committed = Committed::new(card, self.turn, lane, sequence);
        if let Some(combo_id) = combo {
            committed = committed.choosing(combo_id);
        }
        self.lanes[lane].commit(side, committed);
        self.next_sequence += 1;
        self.plays_this_turn[side] += 1;

        let events = self
            .resolver
            .reveal(&mut self.lanes, side, lane, sequence, &mut self.rng);
        self.apply(side, events);

        self.recompute();
        Ok(())
    }

    /// Discard a Nothing/Other card for energy and a replacement draw.
    ///
    /// Returns the id of the replacement card, if the deck had one.
    pub fn sacrifice(&mut self, side: Side, card_id: &CardId) -> EngineResult<Option<CardId>> {
        self.ensure_in_progress("sacrifice")?;

        let checked = self.hands[side]
            .iter()
            .position(|c| &c.id == card_id)
            .ok_or_else(|| IllegalPlay::CardNotInHand {
                side,
                card_id: card_id.clone(),
            })
            .and_then(|position| {
                if self.hands[side][position].kind.is_filler() {
                    Ok(position)
                } else {
                    Err(IllegalPlay::NotSacrificable {
                        card_id: card_id.clone(),
                    })
                }
            });
        let position = match checked {
            Ok(position) => position,
            Err(rejection) => {
                debug!(%side, %card_id, reason = %rejection, "sacrifice rejected");
                return Err(rejection.into());
            }
        };

        let card = self.hands[side].remove(position);
        let energy = self.config.sacrifice_energy;
        self.energy[side] = self.energy[side].saturating_add(energy);
        self.log.record(
            self.turn,
            Some(side),
            LogAction::Sacrifice {
                card_id: card.id.clone(),
                energy,
            },
        );
        let replacement = self.draw(side);
        debug!(%side, card_id = %card.id, energy = self.energy[side], "card sacrificed");
        Ok(replacement)
    }

    /// Close the current turn.
    ///
    /// A side whose opponent committed nothing this turn fires its skip
    /// trigger first. Resolves and returns the outcome when the turn
    /// limit is reached or a side has no cards left in hand or deck.
    /// Otherwise advances the turn, refills energy (plus the skip bonus
    /// for a side that played nothing) and draws.
    pub fn end_turn(&mut self) -> EngineResult<Option<BattleOutcome>> {
        self.ensure_in_progress("end_turn")?;

        for thief in Side::BOTH {
            if self.plays_this_turn[thief.opponent()] > 0 {
                continue;
            }
            if let Some(event) = self.resolver.steal_on_skip(&mut self.lanes, thief) {
                self.apply(thief, vec![event]);
            }
        }

        self.recompute();
        self.log.record(self.turn, None, LogAction::TurnEnd);

        let exhausted = Side::BOTH.into_iter().any(|side| self.is_exhausted(side));
        if self.turn >= self.config.total_turns || exhausted {
            return Ok(Some(self.finish()));
        }

        let skipped = self.plays_this_turn.map(|_, &plays| plays == 0);
        self.turn += 1;

        for side in Side::BOTH {
            let skip_bonus = skipped[side] && self.config.skip_bonus_energy > 0;
            let bonus = if skip_bonus { self.config.skip_bonus_energy } else { 0 };
            let energy = self.config.energy_for_turn(self.turn).saturating_add(bonus);
            self.energy[side] = energy;
            self.log
                .record(self.turn, Some(side), LogAction::EnergyRefill { energy, skip_bonus });

            for _ in 0..self.config.draws_per_turn {
                self.draw(side);
            }
        }
        self.plays_this_turn = SideMap::default();

        debug!(
            turn = self.turn,
            player_energy = self.energy[Side::Player],
            cpu_energy = self.energy[Side::Cpu],
            "turn started"
        );
        Ok(None)
    }

    /// Score the board and end the battle now.
    pub fn resolve(&mut self) -> EngineResult<BattleOutcome> {
        self.ensure_in_progress("resolve")?;
        Ok(self.finish())
    }

    /// The battle from one side's perspective.
    ///
    /// Opponent cards committed this turn are face-down: they are left out
    /// of the viewer's lanes and the powers it sees.
    #[must_use]
    pub fn view(&self, side: Side) -> BattleView {
        let mut lanes = self.lanes.clone();
        let hidden = self.phase == Phase::InProgress && self.plays_this_turn[side.opponent()] > 0;
        if hidden {
            for lane in &mut lanes {
                lane.hide_turn(side.opponent(), self.turn);
            }
            let powers = self.resolver.lane_powers(&lanes, self.turn);
            for (lane, power) in lanes.iter_mut().zip(powers) {
                lane.set_powers(power);
            }
        }

        BattleView {
            side,
            phase: self.phase,
            turn: self.turn,
            total_turns: self.config.total_turns,
            lanes,
            hand: self.hands[side].clone(),
            energy: self.energy[side],
            deck_remaining: self.decks[side].len(),
            opponent_hand_size: self.hands[side.opponent()].len(),
            opponent_deck_remaining: self.decks[side.opponent()].len(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Ability, combo and power rules in use.
    #[must_use]
    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane; LANE_COUNT] {
        &self.lanes
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &[Card] {
        &self.hands[side]
    }

    #[must_use]
    pub fn deck_remaining(&self, side: Side) -> usize {
        self.decks[side].len()
    }

    #[must_use]
    pub fn energy(&self, side: Side) -> u32 {
        self.energy[side]
    }

    /// Cards `side` has committed during the current turn.
    #[must_use]
    pub fn plays_this_turn(&self, side: Side) -> u32 {
        self.plays_this_turn[side]
    }

    /// True when `side` has no cards in hand or deck.
    #[must_use]
    pub fn is_exhausted(&self, side: Side) -> bool {
        self.hands[side].is_empty() && self.decks[side].is_empty()
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Final outcome, once resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    // === Internals ===

    fn ensure_in_progress(&self, operation: &'static str) -> EngineResult<()> {
        if self.phase == Phase::InProgress {
            Ok(())
        } else {
            Err(EngineError::InvalidStateTransition {
                operation,
                phase: self.phase,
            })
        }
    }

    fn check_deck(&self, side: Side, deck: &[Card]) -> EngineResult<()> {
        let report = validate_deck(deck, &self.config);
        if !report.is_valid {
            return Err(EngineError::InvalidDeck {
                side,
                errors: report.messages(),
            });
        }

        let mut seen = FxHashSet::default();
        for card in deck {
            if !seen.insert(&card.id) {
                return Err(EngineError::DuplicateCardId {
                    side,
                    card_id: card.id.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_play(&self, side: Side, card_id: &CardId, lane: usize) -> Result<(usize, u32), IllegalPlay> {
        if lane >= LANE_COUNT {
            return Err(IllegalPlay::UnknownLane {
                index: lane,
                lanes: LANE_COUNT,
            });
        }

        let position = self.hands[side]
            .iter()
            .position(|c| &c.id == card_id)
            .ok_or_else(|| IllegalPlay::CardNotInHand {
                side,
                card_id: card_id.clone(),
            })?;

        let need = self.resolver.energy_cost(&self.hands[side][position]);
        let have = self.energy[side];
        if need > have {
            return Err(IllegalPlay::InsufficientEnergy { have, need });
        }

        Ok((position, need))
    }

    fn check_choice(&self, side: Side, position: usize, combo: Option<&str>) -> Result<(), IllegalPlay> {
        let Some(combo_id) = combo else {
            return Ok(());
        };
        let card = &self.hands[side][position];
        if card.kind != CardKind::VibeFid {
            return Err(IllegalPlay::NotAWildcard {
                card_id: card.id.clone(),
            });
        }
        if !self.resolver.catalog().combos().iter().any(|c| c.id == combo_id) {
            return Err(IllegalPlay::UnknownCombo {
                combo_id: combo_id.to_string(),
            });
        }
        Ok(())
    }

    /// Apply and log what on-reveal or skip effects did for `side`.
    fn apply(&mut self, side: Side, events: Vec<RevealEvent>) {
        for event in events {
            let action = match event {
                RevealEvent::EnergyGained(amount) => {
                    self.energy[side] = self.energy[side].saturating_add(amount);
                    LogAction::EnergyGained { amount }
                }
                RevealEvent::Draw(count) => {
                    for _ in 0..count {
                        self.draw(side);
                    }
                    continue;
                }
                RevealEvent::Adjusted { side: owner, card_id, delta } => {
                    LogAction::PowerShift { owner, card_id, delta }
                }
                RevealEvent::Destroyed { side: owner, card_id, lane } => {
                    LogAction::Destroyed { owner, card_id, lane }
                }
                RevealEvent::Stolen {
                    card_id,
                    from_lane,
                    to_lane,
                    ..
                } => LogAction::Stolen {
                    card_id,
                    from_lane,
                    to_lane,
                },
            };
            self.log.record(self.turn, Some(side), action);
        }
    }

    fn draw(&mut self, side: Side) -> Option<CardId> {
        let card = self.decks[side].pop_front()?;
        let card_id = card.id.clone();
        self.hands[side].push(card);
        self.log.record(
            self.turn,
            Some(side),
            LogAction::Draw {
                card_id: card_id.clone(),
            },
        );
        Some(card_id)
    }

    fn recompute(&mut self) {
        let powers = self.resolver.lane_powers(&self.lanes, self.turn);
        for (lane, power) in self.lanes.iter_mut().zip(powers) {
            lane.set_powers(power);
        }
    }

    fn finish(&mut self) -> BattleOutcome {
        self.recompute();
        let tallies: Vec<LaneTally> = self
            .lanes
            .iter()
            .map(|lane| LaneTally {
                effect: lane.effect(),
                power: lane.powers().clone(),
                highest_card: SideMap::new(|side| self.resolver.highest_card(lane, side)),
            })
            .collect();
        let outcome = BattleOutcome::score(&tallies, self.turn);

        self.phase = Phase::Resolved;
        self.log.record(
            self.turn,
            None,
            LogAction::Resolved {
                winner: outcome.winner(),
            },
        );
        info!(
            turns = outcome.turns_played,
            player_points = outcome.victory_points[Side::Player],
            cpu_points = outcome.victory_points[Side::Cpu],
            result = ?outcome.result,
            "battle resolved"
        );

        self.outcome = Some(outcome.clone());
        outcome
    }
}
