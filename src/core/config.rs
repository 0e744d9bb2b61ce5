//! Battle configuration.
//!
//! `BattleConfig` carries every tunable rule of a match: deck composition
//! limits, the energy curve, turn limit, the sacrifice/skip economy and
//! how lane effects are chosen. The numeric defaults are the live game's
//! values. Lanes default to plain; [`BattleConfig::live`] turns on the
//! random lane draw the live game uses. Tests and alternative modes
//! adjust the rest with the `with_*` builders.
//!
//! The lane count is not configurable: the board is always [`LANE_COUNT`]
//! lanes wide and majority scoring assumes it.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::battle::LaneSetup;

/// Number of lanes on the board.
pub const LANE_COUNT: usize = 3;

/// Tunable battle rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Exact number of cards in a legal deck.
    pub deck_size: u32,

    /// Minimum VBMS + VibeFID cards in a legal deck.
    pub min_identity: u32,

    /// Maximum Nothing + Other cards in a legal deck.
    pub max_filler: u32,

    /// Optional cap on VibeFID cards per deck (`None` = uncapped).
    pub max_vibefid: Option<u32>,

    /// Percent of intrinsic power kept by Nothing/Other cards.
    pub filler_power_percent: u32,

    /// Cards drawn into each hand at match start.
    pub opening_hand: u32,

    /// Cards drawn by each side at the start of every later turn.
    pub draws_per_turn: u32,

    /// The match resolves at the end of this turn.
    pub total_turns: u32,

    /// Energy pool on turn 1.
    pub base_energy: u32,

    /// Energy pool growth per turn.
    pub energy_per_turn: u32,

    /// Energy pool ceiling.
    pub max_energy: u32,

    /// Energy granted by sacrificing a Nothing/Other card.
    pub sacrifice_energy: u32,

    /// Extra energy next turn for a side that committed no cards.
    pub skip_bonus_energy: u32,

    /// Lane effect selection at match start.
    pub lanes: LaneSetup,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            deck_size: 12,
            min_identity: 5,
            max_filler: 7,
            max_vibefid: None,
            filler_power_percent: 50,
            opening_hand: 3,
            draws_per_turn: 1,
            total_turns: 6,
            base_energy: 1,
            energy_per_turn: 1,
            max_energy: 10,
            sacrifice_energy: 2,
            skip_bonus_energy: 2,
            lanes: LaneSetup::Plain,
        }
    }
}

impl BattleConfig {
    /// Create the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live game's rules, random lane effects included.
    pub fn live() -> Self {
        Self::default().with_lanes(LaneSetup::Random)
    }

    /// Choose how lane effects are picked.
    #[must_use]
    pub fn with_lanes(mut self, lanes: LaneSetup) -> Self {
        self.lanes = lanes;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_total_turns(mut self, turns: u32) -> Self {
        self.total_turns = turns;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: u32) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set the energy curve.
    #[must_use]
    pub fn with_energy_curve(mut self, base: u32, per_turn: u32, max: u32) -> Self {
        self.base_energy = base;
        self.energy_per_turn = per_turn;
        self.max_energy = max;
        self
    }

    /// Cap VibeFID cards per deck.
    #[must_use]
    pub fn with_max_vibefid(mut self, max: u32) -> Self {
        self.max_vibefid = Some(max);
        self
    }

    /// Set the skip-turn energy bonus (0 disables it).
    #[must_use]
    pub fn with_skip_bonus(mut self, energy: u32) -> Self {
        self.skip_bonus_energy = energy;
        self
    }

    /// Base energy pool for a turn, before any skip bonus.
    ///
    /// Turn-indexed: the pool never depends on how much was spent earlier.
    #[must_use]
    pub fn energy_for_turn(&self, turn: u32) -> u32 {
        let growth = turn.saturating_sub(1).saturating_mul(self.energy_per_turn);
        self.base_energy.saturating_add(growth).min(self.max_energy)
    }

    /// Check the config for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("deck_size", self.deck_size),
            ("total_turns", self.total_turns),
            ("max_energy", self.max_energy),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field, value });
            }
        }
        if self.min_identity > self.deck_size {
            return Err(ConfigError::IdentityAboveDeckSize {
                min_identity: self.min_identity,
                deck_size: self.deck_size,
            });
        }
        if self.opening_hand > self.deck_size {
            return Err(ConfigError::OpeningHandAboveDeckSize {
                opening_hand: self.opening_hand,
                deck_size: self.deck_size,
            });
        }
        if self.filler_power_percent > 100 {
            return Err(ConfigError::FillerPercent {
                value: self.filler_power_percent,
            });
        }
        if self.base_energy > self.max_energy {
            return Err(ConfigError::EnergyBounds {
                base_energy: self.base_energy,
                max_energy: self.max_energy,
            });
        }
        Ok(())
    }
}
