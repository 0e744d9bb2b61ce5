//! The CPU opponent.
//!
//! One call to [`CpuAi::play_turn`] makes every decision for a turn:
//!
//! 1. Roll a strategy (and, for non-Balanced strategies, a bluff).
//! 2. Sacrifice a filler card when energy is low and no identity card is
//!    affordable.
//! 3. Rank the hand by effective power plus ability weight.
//! 4. Repeatedly pick the first lane in strategy order that is not
//!    overcommitted and play the best affordable card there (worst card
//!    first when bluffing). If no lane takes a card, play the best
//!    affordable card into the lane with the largest deficit.
//!
//! Lane reads go through [`Battle::view`], so the CPU never sees the
//! player's face-down cards for the current turn.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strategy::{worst_lane, LaneReport, Strategy};
use super::{TurnPolicy, TurnReport};
use crate::battle::Battle;
use crate::cards::{Ability, Card, CardCatalog, CardId, Rarity};
use crate::core::{EngineResult, GameRng, Side};
use crate::rules::Resolver;

/// CPU decision constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuTuning {
    /// Relative weights for Aggressive, Balanced, Defensive, Chaotic.
    pub strategy_weights: [f64; 4],

    /// Per-turn chance of reversing card order (non-Balanced only).
    pub bluff_chance: f64,

    /// A lane is close when |deficit| is below this.
    pub close_threshold: u32,

    /// A lane led by more than this is not reinforced further...
    pub overcommit_lead: u32,

    /// ...once it already holds this many CPU cards.
    pub overcommit_min_cards: usize,

    /// Sacrifice only when energy is below this.
    pub sacrifice_below_energy: u32,

    /// Ranking bonus for Mythic, Legendary, Epic and other abilities.
    pub ability_weights: [u32; 4],
}

impl Default for CpuTuning {
    fn default() -> Self {
        Self {
            strategy_weights: [30.0, 40.0, 20.0, 10.0],
            bluff_chance: 0.15,
            close_threshold: 30,
            overcommit_lead: 100,
            overcommit_min_cards: 2,
            sacrifice_below_energy: 3,
            ability_weights: [100, 50, 25, 10],
        }
    }
}

impl CpuTuning {
    /// Set the strategy weights.
    #[must_use]
    pub fn with_strategy_weights(mut self, weights: [f64; 4]) -> Self {
        self.strategy_weights = weights;
        self
    }

    /// Always use one strategy.
    #[must_use]
    pub fn with_fixed_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy_weights = Strategy::ALL.map(|s| if s == strategy { 1.0 } else { 0.0 });
        self
    }

    /// Set the bluff chance.
    #[must_use]
    pub fn with_bluff_chance(mut self, chance: f64) -> Self {
        self.bluff_chance = chance;
        self
    }

    /// Ranking bonus for an ability of the given rarity.
    #[must_use]
    pub fn ability_weight(&self, ability: &Ability) -> u32 {
        match ability.rarity {
            Rarity::Mythic => self.ability_weights[0],
            Rarity::Legendary => self.ability_weights[1],
            Rarity::Epic => self.ability_weights[2],
            Rarity::Rare | Rarity::Common => self.ability_weights[3],
        }
    }
}

/// Heuristic CPU player.
#[derive(Clone, Debug, Default)]
pub struct CpuAi {
    tuning: CpuTuning,
}

impl CpuAi {
    #[must_use]
    pub fn new(tuning: CpuTuning) -> Self {
        Self { tuning }
    }

    #[must_use]
    pub fn tuning(&self) -> &CpuTuning {
        &self.tuning
    }

    /// Ranking score for a card: effective power plus ability weight.
    pub fn priority<C: CardCatalog>(&self, resolver: &Resolver<C>, card: &Card) -> u32 {
        let weight = resolver
            .resolve_ability(card)
            .map_or(0, |ability| self.tuning.ability_weight(ability));
        resolver.effective_power(card).saturating_add(weight)
    }

    /// Hand sorted by priority, highest first. Ties keep hand order.
    pub fn rank_hand<C: CardCatalog>(&self, resolver: &Resolver<C>, hand: &[Card]) -> Vec<Card> {
        let mut ranked = hand.to_vec();
        ranked.sort_by_key(|card| std::cmp::Reverse(self.priority(resolver, card)));
        ranked
    }

    /// Play a full turn for `side`.
    pub fn play_turn<C: CardCatalog>(
        &self,
        battle: &mut Battle<C>,
        side: Side,
        rng: &mut GameRng,
    ) -> EngineResult<TurnReport> {
        let strategy = Strategy::roll(rng, &self.tuning.strategy_weights);
        let bluffed = strategy.can_bluff() && rng.gen_bool(self.tuning.bluff_chance);
        let mut report = TurnReport {
            strategy: Some(strategy),
            bluffed,
            ..TurnReport::default()
        };

        if battle.hand(side).is_empty() {
            return Ok(report);
        }

        report.sacrificed = self.maybe_sacrifice(battle, side)?;

        let ranked = self.rank_hand(battle.resolver(), battle.hand(side));
        let mut used: FxHashSet<CardId> = FxHashSet::default();

        loop {
            let energy = battle.energy(side);
            let affordable = |card: &&Card| !used.contains(&card.id) && card.energy_cost() <= energy;
            if energy == 0 || !ranked.iter().any(|card| affordable(&card)) {
                break;
            }

            let mut lanes = LaneReport::analyze(&battle.view(side), self.tuning.close_threshold);
            let worst = worst_lane(&lanes);
            strategy.order_lanes(&mut lanes, rng);

            let preferred = lanes
                .iter()
                .filter(|lane| {
                    strategy.ignores_overcommit()
                        || !lane.is_overcommitted(self.tuning.overcommit_lead, self.tuning.overcommit_min_cards)
                })
                .find_map(|lane| {
                    let pick = if bluffed {
                        ranked.iter().rev().find(affordable)
                    } else {
                        ranked.iter().find(affordable)
                    };
                    pick.map(|card| (card.id.clone(), lane.index))
                });

            let choice = preferred.or_else(|| {
                let lane = worst?;
                ranked.iter().find(affordable).map(|card| (card.id.clone(), lane))
            });

            let Some((card_id, lane)) = choice else {
                break;
            };
            battle.play_card(side, &card_id, lane)?;
            used.insert(card_id.clone());
            report.plays.push((card_id, lane));
        }

        debug!(
            %side,
            %strategy,
            bluffed,
            plays = report.plays.len(),
            sacrificed = report.sacrificed.is_some(),
            "cpu turn planned"
        );
        Ok(report)
    }

    fn maybe_sacrifice<C: CardCatalog>(
        &self,
        battle: &mut Battle<C>,
        side: Side,
    ) -> EngineResult<Option<CardId>> {
        let energy = battle.energy(side);
        if energy >= self.tuning.sacrifice_below_energy {
            return Ok(None);
        }

        let hand = battle.hand(side);
        let identity_affordable = hand
            .iter()
            .any(|card| card.kind.is_identity() && card.energy_cost() <= energy);
        if identity_affordable {
            return Ok(None);
        }

        let Some(filler) = hand.iter().find(|card| card.kind.is_filler()).map(|c| c.id.clone()) else {
            return Ok(None);
        };
        battle.sacrifice(side, &filler)?;
        Ok(Some(filler))
    }
}

impl TurnPolicy for CpuAi {
    fn take_turn<C: CardCatalog>(
        &mut self,
        battle: &mut Battle<C>,
        side: Side,
        rng: &mut GameRng,
    ) -> EngineResult<TurnReport> {
        self.play_turn(battle, side, rng)
    }
}
