//! Deck validation.
//!
//! Pure and total: any slice of cards, including an empty one, yields a
//! `DeckReport`. Every failed rule is reported; nothing short-circuits.
//! `total_power` is computed whether or not the deck is legal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, CardKind};
use crate::core::BattleConfig;

/// A broken composition rule.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckError {
    #[error("Deck must have exactly {expected} cards (has {actual})")]
    Size { expected: u32, actual: usize },
    #[error("Need at least {min} VBMS/VibeFID cards (has {actual})")]
    TooFewIdentity { min: u32, actual: usize },
    #[error("Max {max} Nothing/Other cards allowed (has {actual})")]
    TooManyFiller { max: u32, actual: usize },
    #[error("Max {max} VibeFID cards allowed (has {actual})")]
    TooManyVibeFid { max: u32, actual: usize },
}

/// Advice that does not make a deck illegal.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckWarning {
    #[error("{count} Nothing cards reduce overall deck power")]
    HeavyNothing { count: usize },
}

/// Card counts by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total: usize,
    pub vbms: usize,
    pub vibefid: usize,
    pub nothing: usize,
    pub other: usize,
}

impl DeckStats {
    /// Count a deck.
    #[must_use]
    pub fn count(deck: &[Card]) -> Self {
        let mut stats = Self {
            total: deck.len(),
            ..Self::default()
        };
        for card in deck {
            match card.kind {
                CardKind::Vbms => stats.vbms += 1,
                CardKind::VibeFid => stats.vibefid += 1,
                CardKind::Nothing => stats.nothing += 1,
                CardKind::Other => stats.other += 1,
            }
        }
        stats
    }

    /// VBMS + VibeFID.
    #[must_use]
    pub fn identity(&self) -> usize {
        self.vbms + self.vibefid
    }

    /// Nothing + Other.
    #[must_use]
    pub fn filler(&self) -> usize {
        self.nothing + self.other
    }
}

/// Validation result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckReport {
    pub is_valid: bool,
    pub errors: Vec<DeckError>,
    pub warnings: Vec<DeckWarning>,
    pub total_power: u64,
    pub stats: DeckStats,
}

impl DeckReport {
    /// Human-readable error reasons.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Nothing count above which a deck earns a warning.
const HEAVY_NOTHING: usize = 3;

/// Validate a deck against the given rules.
#[must_use]
pub fn validate_deck(deck: &[Card], config: &BattleConfig) -> DeckReport {
    let stats = DeckStats::count(deck);
    let mut errors = Vec::new();

    if stats.total != config.deck_size as usize {
        errors.push(DeckError::Size {
            expected: config.deck_size,
            actual: stats.total,
        });
    }

    if stats.identity() < config.min_identity as usize {
        errors.push(DeckError::TooFewIdentity {
            min: config.min_identity,
            actual: stats.identity(),
        });
    }

    if stats.filler() > config.max_filler as usize {
        errors.push(DeckError::TooManyFiller {
            max: config.max_filler,
            actual: stats.filler(),
        });
    }

    if let Some(max) = config.max_vibefid {
        if stats.vibefid > max as usize {
            errors.push(DeckError::TooManyVibeFid {
                max,
                actual: stats.vibefid,
            });
        }
    }

    let mut warnings = Vec::new();
    if stats.nothing > HEAVY_NOTHING {
        warnings.push(DeckWarning::HeavyNothing { count: stats.nothing });
    }

    let total_power = deck
        .iter()
        .map(|card| u64::from(card.effective_power_with(config.filler_power_percent)))
        .sum();

    DeckReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        total_power,
        stats,
    }
}

/// Validate a deck against the default rules.
#[must_use]
pub fn validate(deck: &[Card]) -> DeckReport {
    validate_deck(deck, &BattleConfig::default())
}
