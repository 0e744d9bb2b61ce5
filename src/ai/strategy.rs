//! CPU strategies and lane prioritization.
//!
//! A strategy is rolled fresh every turn and decides which lanes the CPU
//! reinforces first. Each variant has its own ordering rule:
//!
//! | Strategy   | Lanes first                                  |
//! |------------|----------------------------------------------|
//! | Aggressive | already winning, then smallest deficit        |
//! | Balanced   | close, then losing, then smallest deficit     |
//! | Defensive  | losing, then largest deficit                  |
//! | Chaotic    | random                                        |

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::battle::BattleView;
use crate::core::GameRng;

/// A CPU turn plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strategy {
    Aggressive,
    Balanced,
    Defensive,
    Chaotic,
}

impl Strategy {
    /// All strategies, in weight order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Aggressive,
        Strategy::Balanced,
        Strategy::Defensive,
        Strategy::Chaotic,
    ];

    /// Draw a strategy. `weights` follow [`Strategy::ALL`].
    ///
    /// Falls back to `Balanced` if every weight is zero.
    pub fn roll(rng: &mut GameRng, weights: &[f64; 4]) -> Strategy {
        rng.choose_weighted(weights)
            .map_or(Strategy::Balanced, |i| Strategy::ALL[i])
    }

    /// Whether this strategy may reverse its card order to bluff.
    #[must_use]
    pub const fn can_bluff(self) -> bool {
        !matches!(self, Strategy::Balanced)
    }

    /// Whether this strategy keeps reinforcing lanes it already dominates.
    #[must_use]
    pub const fn ignores_overcommit(self) -> bool {
        matches!(self, Strategy::Chaotic)
    }

    /// Put lanes in this strategy's priority order.
    pub fn order_lanes(self, lanes: &mut [LaneReport], rng: &mut GameRng) {
        match self {
            Strategy::Aggressive => lanes.sort_by_key(|l| (!l.is_winning, l.deficit)),
            Strategy::Defensive => lanes.sort_by_key(|l| (!l.is_losing(), Reverse(l.deficit))),
            Strategy::Chaotic => rng.shuffle(lanes),
            Strategy::Balanced => lanes.sort_by_key(|l| (!l.is_close, !l.is_losing(), l.deficit)),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Balanced => "balanced",
            Strategy::Defensive => "defensive",
            Strategy::Chaotic => "chaotic",
        };
        f.write_str(name)
    }
}

/// A lane as the CPU sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneReport {
    pub index: usize,
    pub own: u32,
    pub opponent: u32,
    pub own_cards: usize,
    /// Opponent power minus own power; positive means behind.
    pub deficit: i64,
    pub is_winning: bool,
    pub is_close: bool,
}

impl LaneReport {
    /// Read every lane of a view. `close_threshold` bounds |deficit| for
    /// a lane to count as close.
    #[must_use]
    pub fn analyze(view: &BattleView, close_threshold: u32) -> Vec<LaneReport> {
        (0..view.lanes.len())
            .map(|index| {
                let own = view.own_power(index);
                let opponent = view.opponent_power(index);
                let deficit = i64::from(opponent) - i64::from(own);
                LaneReport {
                    index,
                    own,
                    opponent,
                    own_cards: view.own_cards(index),
                    deficit,
                    is_winning: own > opponent,
                    is_close: deficit.unsigned_abs() < u64::from(close_threshold),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn is_losing(&self) -> bool {
        self.deficit > 0
    }

    /// Ahead by more than `lead` with at least `min_cards` committed.
    #[must_use]
    pub fn is_overcommitted(&self, lead: u32, min_cards: usize) -> bool {
        u64::from(self.own) > u64::from(self.opponent) + u64::from(lead) && self.own_cards >= min_cards
    }
}

/// Lane with the largest deficit; ties go to the lowest index.
#[must_use]
pub fn worst_lane(lanes: &[LaneReport]) -> Option<usize> {
    lanes
        .iter()
        .fold(None::<&LaneReport>, |worst, lane| match worst {
            Some(w) if lane.deficit <= w.deficit => Some(w),
            _ => Some(lane),
        })
        .map(|lane| lane.index)
}
