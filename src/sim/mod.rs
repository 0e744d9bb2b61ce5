//! Match simulation.
//!
//! Drives complete battles between turn policies for replays, balance
//! checks and benchmarks.

pub mod runner;

pub use runner::{run_match, MatchRecord, TurnRecord};
