//! Turn policies: who decides what a side plays.
//!
//! - [`CpuAi`]: the heuristic CPU opponent with rolled strategies
//! - [`PassPolicy`]: commits nothing, for baselines and tests
//! - [`deck::mirror_deck`]: builds the CPU's deck from the player's

pub mod cpu;
pub mod deck;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::battle::Battle;
use crate::cards::{CardCatalog, CardId};
use crate::core::{EngineResult, GameRng, Side};

pub use cpu::{CpuAi, CpuTuning};
pub use deck::mirror_deck;
pub use strategy::{worst_lane, LaneReport, Strategy};

/// What a policy did with its turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Strategy rolled for the turn, for policies that roll one.
    pub strategy: Option<Strategy>,
    pub bluffed: bool,
    pub sacrificed: Option<CardId>,
    /// Cards committed, with their lanes, in play order.
    pub plays: Vec<(CardId, usize)>,
}

/// Decides one side's plays for a turn.
///
/// Implementations act only through `Battle::play_card` and
/// `Battle::sacrifice`; they never end the turn.
pub trait TurnPolicy {
    fn take_turn<C: CardCatalog>(
        &mut self,
        battle: &mut Battle<C>,
        side: Side,
        rng: &mut GameRng,
    ) -> EngineResult<TurnReport>;
}

/// Policy that never plays.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassPolicy;

impl TurnPolicy for PassPolicy {
    fn take_turn<C: CardCatalog>(
        &mut self,
        _battle: &mut Battle<C>,
        _side: Side,
        _rng: &mut GameRng,
    ) -> EngineResult<TurnReport> {
        Ok(TurnReport::default())
    }
}

impl<P: TurnPolicy + ?Sized> TurnPolicy for &mut P {
    fn take_turn<C: CardCatalog>(
        &mut self,
        battle: &mut Battle<C>,
        side: Side,
        rng: &mut GameRng,
    ) -> EngineResult<TurnReport> {
        (**self).take_turn(battle, side, rng)
    }
}
