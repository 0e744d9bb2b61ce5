//! Lanes and committed cards.
//!
//! A lane holds its effect, each side's committed cards in play order and
//! the cached lane powers from the last recompute. Only the battle state
//! machine and on-reveal resolution mutate lanes; everything else reads
//! them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::lane_effect::LaneEffect;
use crate::cards::{Card, CardId};
use crate::core::{Side, SideMap};

/// A card committed to a lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committed {
    pub card: Card,
    /// Turn the card was played on.
    pub turn_played: u32,
    /// Lane index the card sits in.
    pub lane: usize,
    /// Board-wide play order, starting at 0.
    pub sequence: u32,
    /// Power added or removed by on-reveal effects.
    #[serde(default)]
    pub modifier: i32,
    /// Combo a VibeFID card was committed for, if its owner picked one.
    #[serde(default)]
    pub combo_choice: Option<String>,
}

impl Committed {
    /// A freshly played card with no modifier and no combo choice.
    #[must_use]
    pub fn new(card: Card, turn_played: u32, lane: usize, sequence: u32) -> Self {
        Self {
            card,
            turn_played,
            lane,
            sequence,
            modifier: 0,
            combo_choice: None,
        }
    }

    /// Commit for a specific combo.
    #[must_use]
    pub fn choosing(mut self, combo_id: impl Into<String>) -> Self {
        self.combo_choice = Some(combo_id.into());
        self
    }

    /// Shift the modifier, saturating.
    pub(crate) fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.modifier).saturating_add(delta);
        self.modifier = next.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    }
}

/// Inline storage for one side of a lane.
pub type LaneCards = SmallVec<[Committed; 4]>;

/// One of the board's lanes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    index: usize,
    #[serde(default = "plain")]
    effect: LaneEffect,
    cards: SideMap<LaneCards>,
    power: SideMap<u32>,
}

impl Lane {
    /// Create an empty lane.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            effect: LaneEffect::Plain,
            cards: SideMap::default(),
            power: SideMap::default(),
        }
    }

    /// Create an empty lane carrying `effect`.
    #[must_use]
    pub fn with_effect(index: usize, effect: LaneEffect) -> Self {
        Self {
            effect,
            ..Self::new(index)
        }
    }

    /// Position on the board.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn effect(&self) -> LaneEffect {
        self.effect
    }

    /// One side's committed cards, in play order.
    #[must_use]
    pub fn cards(&self, side: Side) -> &[Committed] {
        &self.cards[side]
    }

    /// Cached lane power for a side.
    #[must_use]
    pub fn power(&self, side: Side) -> u32 {
        self.power[side]
    }

    /// Cached lane powers for both sides.
    #[must_use]
    pub fn powers(&self) -> &SideMap<u32> {
        &self.power
    }

    /// Number of cards a side has committed here.
    #[must_use]
    pub fn card_count(&self, side: Side) -> usize {
        self.cards[side].len()
    }

    /// Cards committed by both sides.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards[Side::Player].len() + self.cards[Side::Cpu].len()
    }

    /// Side with strictly higher cached power, if any.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        let player = self.power[Side::Player];
        let cpu = self.power[Side::Cpu];
        match player.cmp(&cpu) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Cpu),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub(crate) fn commit(&mut self, side: Side, committed: Committed) {
        self.cards[side].push(committed);
    }

    pub(crate) fn cards_mut(&mut self, side: Side) -> &mut LaneCards {
        &mut self.cards[side]
    }

    /// Take a card off the board.
    pub(crate) fn remove(&mut self, side: Side, id: &CardId) -> Option<Committed> {
        let at = self.cards[side].iter().position(|c| &c.card.id == id)?;
        Some(self.cards[side].remove(at))
    }

    pub(crate) fn set_powers(&mut self, powers: SideMap<u32>) {
        self.power = powers;
    }

    /// Drop a side's cards committed on `turn`, leaving earlier ones.
    ///
    /// Used to build face-down views; never called on live state.
    pub(crate) fn hide_turn(&mut self, side: Side, turn: u32) {
        self.cards[side].retain(|c| c.turn_played != turn);
    }
}

fn plain() -> LaneEffect {
    LaneEffect::Plain
}
