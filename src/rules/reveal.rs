//! On-reveal and skip-trigger resolution.
//!
//! On-reveal effects run once, right after their card is committed, and
//! leave their result on the board: power changes land in the modifier of
//! every card they touch and destroyed cards leave their lane. Unlike
//! ongoing bonuses they are never recomputed.
//!
//! Enemy effects never pick an Untargetable card and never lower the power
//! of a DiamondHands card. Power never drops below 0: a debuff takes at
//! most what the card has.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::resolver::Resolver;
use crate::battle::{Committed, Lane};
use crate::cards::{Ability, AbilityEffect, AbilityTiming, CardCatalog, CardId};
use crate::core::{GameRng, Side};

/// Percent of its board power a card keeps when taken by StealOnSkip.
const SKIP_STEAL_KEEP_PERCENT: u32 = 50;

/// Something an effect did. The battle applies hand and energy events and
/// logs the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealEvent {
    EnergyGained(u32),
    Draw(u32),
    /// A card's power changed by `delta`.
    Adjusted { side: Side, card_id: CardId, delta: i64 },
    /// A card was removed from the board.
    Destroyed { side: Side, card_id: CardId, lane: usize },
    /// A card changed sides.
    Stolen {
        from: Side,
        card_id: CardId,
        from_lane: usize,
        to_lane: usize,
    },
}

/// Position of a committed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Spot {
    lane: usize,
    side: Side,
    index: usize,
}

/// Why an enemy effect is looking for targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Aim {
    Remove,
    Weaken,
}

impl<C: CardCatalog> Resolver<C> {
    /// Fire the on-reveal effect of the card `side` just committed to
    /// `lane` with play order `sequence`.
    ///
    /// Returns nothing for cards without an on-reveal ability.
    pub fn reveal(
        &self,
        lanes: &mut [Lane],
        side: Side,
        lane: usize,
        sequence: u32,
        rng: &mut GameRng,
    ) -> Vec<RevealEvent> {
        let Some(index) = lanes
            .get(lane)
            .and_then(|l| l.cards(side).iter().position(|c| c.sequence == sequence))
        else {
            return Vec::new();
        };
        let own = Spot { lane, side, index };
        let Some(ability) = self
            .resolve_ability(&at(lanes, own).card)
            .filter(|ability| ability.is_on_reveal())
        else {
            return Vec::new();
        };

        let enemy = side.opponent();
        let mut events = Vec::new();

        match ability.effect {
            AbilityEffect::GainEnergy(amount) => events.push(RevealEvent::EnergyGained(amount)),
            AbilityEffect::Draw(count) => events.push(RevealEvent::Draw(count)),
            AbilityEffect::BuffSelf(v) => self.shift(lanes, own, i64::from(v), &mut events),
            AbilityEffect::FirstCast(v) => {
                let earlier = all_spots(lanes)
                    .filter(|&spot| at(lanes, spot).sequence < sequence)
                    .count();
                self.shift(lanes, own, i64::from(v) * earlier as i64, &mut events);
            }
            AbilityEffect::Ratio => {
                let mine = self.card_power(at(lanes, own));
                let strongest = all_spots(lanes)
                    .filter(|&spot| spot != own)
                    .map(|spot| self.card_power(at(lanes, spot)))
                    .max()
                    .unwrap_or(0);
                if strongest > mine {
                    self.shift(lanes, own, i64::from(strongest - mine), &mut events);
                }
            }
            AbilityEffect::Doxxed => {
                let total: i64 = lanes[lane]
                    .cards(enemy)
                    .iter()
                    .map(|c| i64::from(self.card_power(c)))
                    .sum();
                self.shift(lanes, own, total, &mut events);
            }
            AbilityEffect::BuffAdjacent(v) => {
                let friends: Vec<Spot> = lane_spots(lanes, lane, side).filter(|&s| s != own).collect();
                for spot in friends {
                    self.shift(lanes, spot, i64::from(v), &mut events);
                }
            }
            AbilityEffect::BuffOtherLanes(v) => {
                let friends: Vec<Spot> = side_spots(lanes, side).filter(|s| s.lane != lane).collect();
                for spot in friends {
                    self.shift(lanes, spot, i64::from(v), &mut events);
                }
            }
            AbilityEffect::BuffWeakest(v) => {
                let weakest = side_spots(lanes, side)
                    .filter(|&s| s != own)
                    .min_by_key(|&s| self.card_power(at(lanes, s)));
                if let Some(spot) = weakest {
                    self.shift(lanes, spot, i64::from(v), &mut events);
                }
            }
            AbilityEffect::DebuffEnemyInLane(v) => {
                let targets = self.targets(lanes, lane_spots(lanes, lane, enemy), Aim::Weaken);
                if let Some(spot) = pick(&targets, rng) {
                    self.weaken(lanes, spot, v, &mut events);
                }
            }
            AbilityEffect::DebuffLane(v) => {
                for spot in self.targets(lanes, lane_spots(lanes, lane, enemy), Aim::Weaken) {
                    self.weaken(lanes, spot, v, &mut events);
                }
            }
            AbilityEffect::DebuffStrongest(v) => {
                let targets = self.targets(lanes, side_spots(lanes, enemy), Aim::Weaken);
                if let Some(spot) = self.strongest(lanes, &targets) {
                    self.weaken(lanes, spot, v, &mut events);
                }
            }
            AbilityEffect::StealPower(v) => {
                let targets = self.targets(lanes, lane_spots(lanes, lane, enemy), Aim::Weaken);
                if let Some(spot) = pick(&targets, rng) {
                    let taken = self.weaken(lanes, spot, v, &mut events);
                    self.shift(lanes, own, i64::from(taken), &mut events);
                }
            }
            AbilityEffect::DestroyHighestEnemy { gain_power } => {
                let targets = self.targets(lanes, side_spots(lanes, enemy), Aim::Remove);
                if let Some(spot) = self.strongest(lanes, &targets) {
                    let power = self.card_power(at(lanes, spot));
                    let removed = lanes[spot.lane].cards_mut(spot.side).remove(spot.index);
                    events.push(RevealEvent::Destroyed {
                        side: spot.side,
                        card_id: removed.card.id,
                        lane: spot.lane,
                    });
                    if gain_power {
                        self.shift(lanes, own, i64::from(power), &mut events);
                    }
                }
            }
            _ => {}
        }

        debug!(%side, lane, ability = %ability.name, events = events.len(), "on-reveal resolved");
        events
    }

    /// Fire `thief`'s skip trigger after a turn in which the opponent
    /// committed nothing.
    ///
    /// The first lane holding a StealOnSkip card takes the opponent's
    /// strongest targetable card from anywhere on the board at half power.
    /// Fires at most once per call.
    pub fn steal_on_skip(&self, lanes: &mut [Lane], thief: Side) -> Option<RevealEvent> {
        let to_lane = lanes.iter().position(|lane| {
            lane.cards(thief).iter().any(|c| {
                self.resolve_ability(&c.card)
                    .is_some_and(|a| a.timing == AbilityTiming::OnEnemySkip)
            })
        })?;

        let victim = thief.opponent();
        let targets = self.targets(lanes, side_spots(lanes, victim), Aim::Remove);
        let spot = self.strongest(lanes, &targets)?;

        let mut card = lanes[spot.lane].cards_mut(victim).remove(spot.index);
        let power = self.card_power(&card);
        let kept = power * SKIP_STEAL_KEEP_PERCENT / 100;
        card.adjust(i64::from(kept) - i64::from(power));
        card.lane = to_lane;
        let card_id = card.card.id.clone();
        lanes[to_lane].commit(thief, card);

        debug!(%thief, %card_id, from = spot.lane, to = to_lane, "card stolen on skip");
        Some(RevealEvent::Stolen {
            from: victim,
            card_id,
            from_lane: spot.lane,
            to_lane,
        })
    }

    /// Enemy cards an effect may hit.
    fn targets(&self, lanes: &[Lane], spots: impl Iterator<Item = Spot>, aim: Aim) -> Vec<Spot> {
        spots
            .filter(|&spot| match self.resolve_ability(&at(lanes, spot).card) {
                Some(Ability {
                    effect: AbilityEffect::Untargetable { .. },
                    ..
                }) => false,
                Some(Ability {
                    effect: AbilityEffect::DiamondHands { .. },
                    ..
                }) => aim == Aim::Remove,
                _ => true,
            })
            .collect()
    }

    /// First card with the highest board power.
    fn strongest(&self, lanes: &[Lane], spots: &[Spot]) -> Option<Spot> {
        spots
            .iter()
            .copied()
            .min_by_key(|&spot| Reverse(self.card_power(at(lanes, spot))))
    }

    fn shift(&self, lanes: &mut [Lane], spot: Spot, delta: i64, events: &mut Vec<RevealEvent>) {
        if delta == 0 {
            return;
        }
        let committed = &mut lanes[spot.lane].cards_mut(spot.side)[spot.index];
        committed.adjust(delta);
        events.push(RevealEvent::Adjusted {
            side: spot.side,
            card_id: committed.card.id.clone(),
            delta,
        });
    }

    /// Lower a card by up to `amount`, returning what was actually taken.
    fn weaken(&self, lanes: &mut [Lane], spot: Spot, amount: u32, events: &mut Vec<RevealEvent>) -> u32 {
        let taken = amount.min(self.card_power(at(lanes, spot)));
        self.shift(lanes, spot, -i64::from(taken), events);
        taken
    }
}

fn at(lanes: &[Lane], spot: Spot) -> &Committed {
    &lanes[spot.lane].cards(spot.side)[spot.index]
}

fn lane_spots(lanes: &[Lane], lane: usize, side: Side) -> impl Iterator<Item = Spot> {
    let count = lanes.get(lane).map_or(0, |l| l.card_count(side));
    (0..count).map(move |index| Spot { lane, side, index })
}

fn side_spots(lanes: &[Lane], side: Side) -> impl Iterator<Item = Spot> + '_ {
    (0..lanes.len()).flat_map(move |lane| lane_spots(lanes, lane, side))
}

fn all_spots(lanes: &[Lane]) -> impl Iterator<Item = Spot> + '_ {
    Side::BOTH.into_iter().flat_map(move |side| side_spots(lanes, side))
}

fn pick(spots: &[Spot], rng: &mut GameRng) -> Option<Spot> {
    if spots.is_empty() {
        None
    } else {
        Some(spots[rng.gen_range_usize(0..spots.len())])
    }
}
