//! Lane effects.
//!
//! Every lane can carry one effect that reshapes how power is counted
//! there. Most effects add a per-card term during the recompute; a few
//! rewrite the finished lane powers (`SwapSides`, `CopyEnemy`) and a few
//! only change how the lane is scored at resolution.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Foil, Rarity};
use crate::core::{GameRng, Side, LANE_COUNT};

/// A lane's rule modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneEffect {
    /// No effect.
    Plain,
    /// +v to the first card a side committed here.
    BuffFirst(u32),
    /// +v to a side's strongest card here (ties all count).
    BuffHighest(u32),
    /// +v to a side's weakest card here (ties all count).
    BuffLowest(u32),
    /// +v × turn to every card.
    BuffPerTurn(u32),
    /// -v × turn to every card.
    DebuffPerTurn(u32),
    /// -v to every CPU card.
    DebuffCpu(u32),
    /// Legendary cards count twice.
    DoubleLegendary,
    /// +v to Common cards.
    BuffCommon(u32),
    /// +v to foil cards.
    BuffFoil(u32),
    /// +v to Nothing cards.
    BuffNothing(u32),
    /// +v to VibeFID cards.
    BuffVibeFid(u32),
    /// +v to a card that is alone on its side.
    BuffAlone(u32),
    /// +v × side card count to every card.
    BuffPerCard(u32),
    /// +v to every card of a side with less raw board power here.
    BuffIfLosing(u32),
    /// The weaker side's lane power is raised to the stronger side's.
    CopyEnemy,
    /// Cards of the side with fewer cards here count twice.
    DoubleIfFewer,
    /// Cards count twice if `doubled`, else lose half their power.
    /// The coin is flipped once, when the lane is drawn.
    Gamble { doubled: bool },
    /// The two sides' lane powers are exchanged.
    SwapSides,
    /// Lower power wins the lane.
    ReverseOrder,
    /// -v to cards with at least [`TAX_THRESHOLD`] board power.
    TaxHigh(u32),
    /// Only each side's strongest card decides the lane.
    HighestWins,
    /// The lane is not scored.
    NoVictory,
    /// Winning the lane is worth two lane victories.
    DoubleVictory,
}

/// Board power at which `TaxHigh` applies.
pub const TAX_THRESHOLD: u32 = 50;

/// The live game's lane pool.
pub const STANDARD_LANES: [LaneEffect; 23] = [
    LaneEffect::BuffFirst(40),
    LaneEffect::BuffHighest(50),
    LaneEffect::BuffLowest(45),
    LaneEffect::BuffPerTurn(15),
    LaneEffect::DebuffPerTurn(12),
    LaneEffect::DebuffCpu(25),
    LaneEffect::DoubleLegendary,
    LaneEffect::BuffCommon(30),
    LaneEffect::BuffFoil(60),
    LaneEffect::BuffNothing(50),
    LaneEffect::BuffVibeFid(40),
    LaneEffect::BuffAlone(60),
    LaneEffect::BuffPerCard(15),
    LaneEffect::BuffIfLosing(35),
    LaneEffect::CopyEnemy,
    LaneEffect::DoubleIfFewer,
    LaneEffect::Gamble { doubled: false },
    LaneEffect::SwapSides,
    LaneEffect::ReverseOrder,
    LaneEffect::TaxHigh(20),
    LaneEffect::HighestWins,
    LaneEffect::NoVictory,
    LaneEffect::DoubleVictory,
];

/// How a battle's lanes get their effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneSetup {
    /// Every lane is `Plain`.
    #[default]
    Plain,
    /// Three distinct effects drawn from [`STANDARD_LANES`].
    Random,
    /// Exactly these effects, in lane order.
    Fixed([LaneEffect; LANE_COUNT]),
}

impl LaneSetup {
    /// Pick the effects for a new board.
    pub fn draw(&self, rng: &mut GameRng) -> [LaneEffect; LANE_COUNT] {
        match *self {
            LaneSetup::Plain => [LaneEffect::Plain; LANE_COUNT],
            LaneSetup::Fixed(effects) => effects,
            LaneSetup::Random => {
                let mut pool = STANDARD_LANES;
                rng.shuffle(&mut pool);
                let mut drawn = [LaneEffect::Plain; LANE_COUNT];
                for (slot, effect) in drawn.iter_mut().zip(pool) {
                    *slot = match effect {
                        LaneEffect::Gamble { .. } => LaneEffect::Gamble {
                            doubled: rng.gen_bool(0.5),
                        },
                        other => other,
                    };
                }
                drawn
            }
        }
    }
}

/// What a lane effect sees of one card while the lane is recomputed.
#[derive(Clone, Copy, Debug)]
pub struct CardContext<'a> {
    pub card: &'a Card,
    pub side: Side,
    /// The card's board power.
    pub power: u32,
    /// Position among its side's cards here, in play order.
    pub position: usize,
    /// Board powers of every card on its side here.
    pub side_powers: &'a [u32],
    /// Cards the opponent has here.
    pub enemy_count: usize,
    /// Sum of board powers on the opponent's side here.
    pub enemy_total: u64,
    pub turn: u32,
}

impl LaneEffect {
    /// Display name used by the live game.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LaneEffect::Plain => "Open Field",
            LaneEffect::BuffFirst(_) => "Moon Base",
            LaneEffect::BuffHighest(_) => "Whale Waters",
            LaneEffect::BuffLowest(_) => "Shrimp Shore",
            LaneEffect::BuffPerTurn(_) => "Hopium Farms",
            LaneEffect::DebuffPerTurn(_) => "Paper Hands",
            LaneEffect::DebuffCpu(_) => "Vlady's Dungeon",
            LaneEffect::DoubleLegendary => "Nico's Throne",
            LaneEffect::BuffCommon(_) => "Dan's Backyard",
            LaneEffect::BuffFoil(_) => "NFT Gallery",
            LaneEffect::BuffNothing(_) => "Mint Factory",
            LaneEffect::BuffVibeFid(_) => "Vibe HQ",
            LaneEffect::BuffAlone(_) => "Mom's Basement",
            LaneEffect::BuffPerCard(_) => "Discord Server",
            LaneEffect::BuffIfLosing(_) => "Copium Den",
            LaneEffect::CopyEnemy => "Copycat Cafe",
            LaneEffect::DoubleIfFewer => "Underdog Arena",
            LaneEffect::Gamble { .. } => "Degen Valley",
            LaneEffect::SwapSides => "Liquidity Pool",
            LaneEffect::ReverseOrder => "Clown College",
            LaneEffect::TaxHigh(_) => "Taxman's Office",
            LaneEffect::HighestWins => "ATH Peak",
            LaneEffect::NoVictory => "Bridge",
            LaneEffect::DoubleVictory => "Double Stakes",
        }
    }

    /// Signed power term this effect adds to one card.
    #[must_use]
    pub fn card_bonus(&self, ctx: &CardContext<'_>) -> i64 {
        let power = i64::from(ctx.power);
        let flat = |hit: bool, value: u32| if hit { i64::from(value) } else { 0 };

        match *self {
            LaneEffect::BuffFirst(v) => flat(ctx.position == 0, v),
            LaneEffect::BuffHighest(v) => {
                flat(ctx.side_powers.iter().max() == Some(&ctx.power), v)
            }
            LaneEffect::BuffLowest(v) => {
                flat(ctx.side_powers.iter().min() == Some(&ctx.power), v)
            }
            LaneEffect::BuffPerTurn(v) => i64::from(v) * i64::from(ctx.turn),
            LaneEffect::DebuffPerTurn(v) => -(i64::from(v) * i64::from(ctx.turn)),
            LaneEffect::DebuffCpu(v) => -flat(ctx.side == Side::Cpu, v),
            LaneEffect::DoubleLegendary => {
                if ctx.card.rarity == Rarity::Legendary {
                    power
                } else {
                    0
                }
            }
            LaneEffect::BuffCommon(v) => flat(ctx.card.rarity == Rarity::Common, v),
            LaneEffect::BuffFoil(v) => flat(ctx.card.foil != Foil::None, v),
            LaneEffect::BuffNothing(v) => flat(ctx.card.kind == CardKind::Nothing, v),
            LaneEffect::BuffVibeFid(v) => flat(ctx.card.kind == CardKind::VibeFid, v),
            LaneEffect::BuffAlone(v) => flat(ctx.side_powers.len() == 1, v),
            LaneEffect::BuffPerCard(v) => i64::from(v) * ctx.side_powers.len() as i64,
            LaneEffect::BuffIfLosing(v) => {
                let own: u64 = ctx.side_powers.iter().map(|&p| u64::from(p)).sum();
                flat(own < ctx.enemy_total, v)
            }
            LaneEffect::DoubleIfFewer => {
                if ctx.side_powers.len() < ctx.enemy_count {
                    power
                } else {
                    0
                }
            }
            LaneEffect::Gamble { doubled: true } => power,
            LaneEffect::Gamble { doubled: false } => -(power / 2),
            LaneEffect::TaxHigh(v) => -flat(ctx.power >= TAX_THRESHOLD, v),
            LaneEffect::Plain
            | LaneEffect::CopyEnemy
            | LaneEffect::SwapSides
            | LaneEffect::ReverseOrder
            | LaneEffect::HighestWins
            | LaneEffect::NoVictory
            | LaneEffect::DoubleVictory => 0,
        }
    }

    /// Rewrite finished `(player, cpu)` lane powers.
    #[must_use]
    pub fn adjust_totals(&self, player: i64, cpu: i64) -> (i64, i64) {
        match self {
            LaneEffect::SwapSides => (cpu, player),
            LaneEffect::CopyEnemy => {
                let top = player.max(cpu);
                (top, top)
            }
            _ => (player, cpu),
        }
    }

    /// Lane victories a win here is worth.
    #[must_use]
    pub fn victory_weight(&self) -> u32 {
        match self {
            LaneEffect::NoVictory => 0,
            LaneEffect::DoubleVictory => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for LaneEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
