//! Core engine types: sides, configuration, errors, RNG.
//!
//! Everything here is independent of card data and battle rules.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{BattleConfig, LANE_COUNT};
pub use error::{ConfigError, EngineError, EngineResult, IllegalPlay};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
