//! Match scoring.
//!
//! Each lane goes to the side with strictly higher power; equal power is a
//! lane tie. Lane effects adjust this: `ReverseOrder` lanes go to the lower
//! power, `HighestWins` lanes compare each side's strongest card, and a lane
//! is worth `victory_weight()` lane victories (0 for `NoVictory`, 2 for
//! `DoubleVictory`). The match goes to the side holding a majority of the
//! victories on offer. Anything else is an overall tie. There is no
//! tiebreaker.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::lane_effect::LaneEffect;
use crate::core::{Side, SideMap};

/// Overall result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Winner(Side),
    Tie,
}

/// Result from one side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideResult {
    Win,
    Loss,
    Tie,
}

/// What scoring needs to know about one lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneTally {
    pub effect: LaneEffect,
    pub power: SideMap<u32>,
    /// Each side's strongest card, for `HighestWins` lanes.
    pub highest_card: SideMap<u32>,
}

impl LaneTally {
    /// A plain lane with the given powers.
    #[must_use]
    pub fn plain(power: SideMap<u32>) -> Self {
        Self {
            effect: LaneEffect::Plain,
            power,
            highest_card: SideMap::default(),
        }
    }

    /// Side that takes the lane, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        let score = match self.effect {
            LaneEffect::HighestWins => &self.highest_card,
            _ => &self.power,
        };
        let ordering = score[Side::Player].cmp(&score[Side::Cpu]);
        let ordering = match self.effect {
            LaneEffect::ReverseOrder => ordering.reverse(),
            _ => ordering,
        };
        match ordering {
            Ordering::Greater => Some(Side::Player),
            Ordering::Less => Some(Side::Cpu),
            Ordering::Equal => None,
        }
    }
}

/// Final state of a single lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneResult {
    pub index: usize,
    pub effect: LaneEffect,
    pub power: SideMap<u32>,
    /// `None` for a lane tie.
    pub winner: Option<Side>,
    /// Lane victories the winner collects.
    pub weight: u32,
}

/// Everything a result screen needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub result: MatchResult,
    pub lanes: Vec<LaneResult>,
    /// Scored lanes won by each side.
    pub lane_wins: SideMap<usize>,
    /// Scored lanes that tied.
    pub lane_ties: usize,
    /// Lane victories collected by each side.
    pub victory_points: SideMap<u32>,
    /// Sum of lane powers per side.
    pub board_totals: SideMap<u64>,
    pub turns_played: u32,
}

impl BattleOutcome {
    /// Score final lanes.
    #[must_use]
    pub fn score(tallies: &[LaneTally], turns_played: u32) -> Self {
        let lanes: Vec<LaneResult> = tallies
            .iter()
            .enumerate()
            .map(|(index, tally)| LaneResult {
                index,
                effect: tally.effect,
                power: tally.power.clone(),
                winner: tally.winner(),
                weight: tally.effect.victory_weight(),
            })
            .collect();

        let scored = || lanes.iter().filter(|l| l.weight > 0);
        let lane_wins = SideMap::new(|side| scored().filter(|l| l.winner == Some(side)).count());
        let lane_ties = scored().filter(|l| l.winner.is_none()).count();
        let victory_points = SideMap::new(|side| {
            scored()
                .filter(|l| l.winner == Some(side))
                .map(|l| l.weight)
                .sum()
        });
        let board_totals = SideMap::new(|side| lanes.iter().map(|l| u64::from(l.power[side])).sum());

        let on_offer: u32 = scored().map(|l| l.weight).sum();
        let majority = on_offer / 2 + 1;
        let result = Side::BOTH
            .into_iter()
            .find(|&side| victory_points[side] >= majority)
            .map_or(MatchResult::Tie, MatchResult::Winner);

        Self {
            result,
            lanes,
            lane_wins,
            lane_ties,
            victory_points,
            board_totals,
            turns_played,
        }
    }

    /// Winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.result {
            MatchResult::Winner(side) => Some(side),
            MatchResult::Tie => None,
        }
    }

    /// Result from `side`'s point of view.
    #[must_use]
    pub fn result_for(&self, side: Side) -> SideResult {
        match self.result {
            MatchResult::Winner(winner) if winner == side => SideResult::Win,
            MatchResult::Winner(_) => SideResult::Loss,
            MatchResult::Tie => SideResult::Tie,
        }
    }
}
