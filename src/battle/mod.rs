//! Lane battles.
//!
//! ## Battle
//!
//! [`Battle`] owns all mutable match state: lanes, hands, decks, energy
//! and the log. It is only changed through `start`, `play_card`,
//! `sacrifice`, `end_turn` and `resolve`.
//!
//! ## Scoring
//!
//! [`BattleOutcome`] scores final lane powers: a majority of the lane
//! victories on offer wins, anything else is a tie. Lane effects can
//! change what a lane is worth and how it is decided.

pub mod lane;
pub mod lane_effect;
pub mod log;
pub mod outcome;
pub mod state;
pub mod view;

use serde::{Deserialize, Serialize};

pub use lane::{Committed, Lane, LaneCards};
pub use lane_effect::{CardContext, LaneEffect, LaneSetup, STANDARD_LANES, TAX_THRESHOLD};
pub use log::{BattleLog, LogAction, LogEntry};
pub use outcome::{BattleOutcome, LaneResult, LaneTally, MatchResult, SideResult};
pub use state::Battle;
pub use view::BattleView;

/// Battle lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Created; decks not yet dealt.
    Setup,
    /// Cards are being played.
    InProgress,
    /// Scored. No further operations.
    Resolved,
}
