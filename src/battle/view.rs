//! One side's view of a battle.

use serde::{Deserialize, Serialize};

use super::lane::Lane;
use super::Phase;
use crate::cards::Card;
use crate::core::{Side, LANE_COUNT};

/// What a side can see: its own hand and energy, both sides' revealed
/// lane cards, and only counts for the opponent's hidden zones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleView {
    pub side: Side,
    pub phase: Phase,
    pub turn: u32,
    pub total_turns: u32,
    pub lanes: [Lane; LANE_COUNT],
    pub hand: Vec<Card>,
    pub energy: u32,
    pub deck_remaining: usize,
    pub opponent_hand_size: usize,
    pub opponent_deck_remaining: usize,
}

impl BattleView {
    /// Viewer's power in a lane.
    #[must_use]
    pub fn own_power(&self, lane: usize) -> u32 {
        self.lanes[lane].power(self.side)
    }

    /// Opponent's visible power in a lane.
    #[must_use]
    pub fn opponent_power(&self, lane: usize) -> u32 {
        self.lanes[lane].power(self.side.opponent())
    }

    /// Cards the viewer has committed to a lane.
    #[must_use]
    pub fn own_cards(&self, lane: usize) -> usize {
        self.lanes[lane].card_count(self.side)
    }

    /// Turns left after the current one.
    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.total_turns.saturating_sub(self.turn)
    }
}
