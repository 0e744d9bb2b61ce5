//! # vibe-clash
//!
//! Lane battle engine for the Vibe Clash card game.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules, Injected Data**: abilities, combos and name aliases come
//!    from a `CardCatalog` handed to the engine. No global tables.
//!
//! 2. **Errors Are Values**: deck problems come back as a `DeckReport`,
//!    illegal plays as `IllegalPlay`. Only calling an operation in the
//!    wrong phase is fatal.
//!
//! 3. **Reproducible Randomness**: every shuffle and AI roll goes through
//!    a seeded `GameRng`, so a match replays exactly from its seed.
//!
//! ## Architecture
//!
//! - **Derived Power**: lane power is recomputed from the committed cards
//!   after every play. Nothing is accumulated, so bonuses vanish as soon as
//!   their source does.
//!
//! - **Persistent Log**: the battle log is an `im::Vector`, cheap to clone
//!   along with the battle.
//!
//! ## Modules
//!
//! - `core`: sides, configuration, errors, RNG
//! - `cards`: card values, abilities, combos, catalog
//! - `rules`: deck validation, ability/combo/lane power resolution
//! - `battle`: the battle state machine, lanes, log and scoring
//! - `ai`: turn policies, the CPU opponent, CPU deck generation
//! - `sim`: full-match runner

pub mod core;
pub mod cards;
pub mod rules;
pub mod battle;
pub mod ai;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, LANE_COUNT,
    ConfigError, EngineError, EngineResult, IllegalPlay,
    GameRng, GameRngState,
    Side, SideMap,
};

pub use crate::cards::{
    Ability, AbilityCategory, AbilityEffect, AbilityTiming,
    Card, CardId, CardKind, Foil, Rarity,
    CardCatalog, StaticCatalog,
    BonusKind, BonusTarget, Combo, ComboBonus, ComboMatch,
};

pub use crate::rules::{
    validate, validate_deck, DeckError, DeckReport, DeckStats, DeckWarning, Resolver, RevealEvent,
};

pub use crate::battle::{
    Battle, BattleLog, BattleOutcome, BattleView, Committed, Lane, LaneEffect, LaneResult,
    LaneSetup, LaneTally, LogAction, LogEntry, MatchResult, Phase, SideResult, STANDARD_LANES,
};

pub use crate::ai::{mirror_deck, CpuAi, CpuTuning, LaneReport, PassPolicy, Strategy, TurnPolicy, TurnReport};

pub use crate::sim::{run_match, MatchRecord, TurnRecord};
