//! CPU deck generation.
//!
//! The CPU mirrors the player's deck: one VBMS card per template card,
//! same name and rarity, with a freshly rolled foil and power.
//!
//! Mirroring is a deliberate simplification. The live arena draws CPU
//! decks from the whole card collection; here the CPU gets a deck of the
//! same shape as the player's, so matches stay comparable across seeds
//! and no collection data has to be shipped with the engine.

use crate::cards::{Card, CardId, CardKind, Foil, Rarity};
use crate::core::GameRng;

const PRIZE_CHANCE: f64 = 0.10;
const STANDARD_CHANCE: f64 = 0.25;
const VARIANCE_MIN: f64 = 0.95;
const VARIANCE_SPAN: f64 = 0.15;

/// Base power the CPU rolls around, by rarity.
#[must_use]
pub const fn rarity_power(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Mythic => 800,
        Rarity::Legendary => 240,
        Rarity::Epic => 80,
        Rarity::Rare => 20,
        Rarity::Common => 5,
    }
}

/// Power multiplier of a foil finish.
#[must_use]
pub const fn foil_multiplier(foil: Foil) -> f64 {
    match foil {
        Foil::Prize => 3.0,
        Foil::Standard => 1.5,
        Foil::None => 1.0,
    }
}

/// Build a CPU deck from the player's.
///
/// Every card comes back as VBMS, so the result always satisfies the
/// identity minimum whenever the template has a legal size.
pub fn mirror_deck(template: &[Card], rng: &mut GameRng) -> Vec<Card> {
    template
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let roll = rng.gen_unit();
            let foil = if roll < PRIZE_CHANCE {
                Foil::Prize
            } else if roll < PRIZE_CHANCE + STANDARD_CHANCE {
                Foil::Standard
            } else {
                Foil::None
            };

            let variance = VARIANCE_MIN + rng.gen_unit() * VARIANCE_SPAN;
            let power = (f64::from(rarity_power(source.rarity)) * foil_multiplier(foil) * variance).floor() as u32;

            let name = source.name.clone().unwrap_or_else(|| "card".to_string());
            Card::new(
                CardId::new(format!("cpu-{i}-{}", name.to_lowercase())),
                CardKind::Vbms,
                source.rarity,
                power,
            )
            .named(name)
            .with_foil(foil)
        })
        .collect()
}
