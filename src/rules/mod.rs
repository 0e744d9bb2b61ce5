//! Game rules.
//!
//! - `validator`: deck composition checks, run before a match starts
//! - `resolver`: abilities, combos and lane power, run on every recompute
//! - `reveal`: on-reveal and skip-trigger effects, run once when they fire
//!
//! Both share the same effective-power rule through `Card`, so validation
//! totals and battle totals never disagree.

pub mod resolver;
pub mod reveal;
pub mod validator;

pub use resolver::Resolver;
pub use reveal::RevealEvent;
pub use validator::{validate, validate_deck, DeckError, DeckReport, DeckStats, DeckWarning};
