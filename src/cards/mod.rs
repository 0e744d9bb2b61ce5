//! Card data: value objects, abilities, combos and the catalog.
//!
//! ## Key Types
//!
//! - `Card`: an immutable card as dealt into a battle
//! - `CardKind`: VBMS / VibeFID (identity) vs Nothing / Other (filler)
//! - `Ability`: catalog ability attached to a named identity card
//! - `Combo`: named member set that rewards cards played together
//! - `CardCatalog`: injected lookup for abilities, combos and aliases

pub mod ability;
pub mod card;
pub mod catalog;
pub mod combo;

pub use ability::{Ability, AbilityCategory, AbilityEffect, AbilityTiming};
pub use card::{Card, CardId, CardKind, Foil, Rarity};
pub use catalog::{CardCatalog, StaticCatalog};
pub use combo::{BonusKind, BonusTarget, Combo, ComboBonus, ComboMatch};
