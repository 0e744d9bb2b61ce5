//! Engine error taxonomy.
//!
//! - Deck composition problems are *not* errors here: the validator returns
//!   a structured report (`rules::DeckReport`).
//! - `IllegalPlay` is an expected, recoverable rejection. State is untouched.
//! - `EngineError::InvalidStateTransition` is a contract violation by the
//!   caller and should not be retried.

use thiserror::Error;

use super::side::Side;
use crate::battle::Phase;
use crate::cards::CardId;

/// A play or sacrifice that violated a precondition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IllegalPlay {
    #[error("lane {index} does not exist (lanes are 0..{lanes})")]
    UnknownLane { index: usize, lanes: usize },
    #[error("card {card_id} is not in the {side} hand")]
    CardNotInHand { side: Side, card_id: CardId },
    #[error("not enough energy (have={have}, need={need})")]
    InsufficientEnergy { have: u32, need: u32 },
    #[error("card {card_id} is not a Nothing/Other card and cannot be sacrificed")]
    NotSacrificable { card_id: CardId },
    #[error("card {card_id} is not a VibeFID card and cannot choose a combo")]
    NotAWildcard { card_id: CardId },
    #[error("combo {combo_id} does not exist")]
    UnknownCombo { combo_id: String },
}

/// Rejected tuning values in `BattleConfig`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    Zero { field: &'static str, value: u32 },
    #[error("min_identity ({min_identity}) exceeds deck_size ({deck_size})")]
    IdentityAboveDeckSize { min_identity: u32, deck_size: u32 },
    #[error("opening_hand ({opening_hand}) exceeds deck_size ({deck_size})")]
    OpeningHandAboveDeckSize { opening_hand: u32, deck_size: u32 },
    #[error("filler_power_percent must be <= 100 (got {value})")]
    FillerPercent { value: u32 },
    #[error("base_energy ({base_energy}) exceeds max_energy ({max_energy})")]
    EnergyBounds { base_energy: u32, max_energy: u32 },
}

/// Errors surfaced by battle operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("illegal play: {0}")]
    IllegalPlay(#[from] IllegalPlay),
    #[error("{operation} is not allowed in phase {phase:?}")]
    InvalidStateTransition { operation: &'static str, phase: Phase },
    #[error("{side} deck failed validation: {}", .errors.join("; "))]
    InvalidDeck { side: Side, errors: Vec<String> },
    #[error("{side} deck contains card id {card_id} more than once")]
    DuplicateCardId { side: Side, card_id: CardId },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True only for caller contract violations.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::InvalidStateTransition { .. })
    }

    /// The rejected play, if this is one.
    #[must_use]
    pub fn as_illegal_play(&self) -> Option<&IllegalPlay> {
        match self {
            EngineError::IllegalPlay(play) => Some(play),
            _ => None,
        }
    }
}

/// Result alias for battle operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_state_transition_is_fatal() {
        let fatal = EngineError::InvalidStateTransition {
            operation: "play_card",
            phase: Phase::Resolved,
        };
        assert!(fatal.is_fatal());

        let illegal: EngineError = IllegalPlay::InsufficientEnergy { have: 1, need: 4 }.into();
        assert!(!illegal.is_fatal());
        assert_eq!(
            illegal.as_illegal_play(),
            Some(&IllegalPlay::InsufficientEnergy { have: 1, need: 4 })
        );

        let config: EngineError = ConfigError::Zero { field: "deck_size", value: 0 }.into();
        assert!(!config.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = IllegalPlay::UnknownLane { index: 5, lanes: 3 };
        assert_eq!(err.to_string(), "lane 5 does not exist (lanes are 0..3)");

        let err = EngineError::InvalidDeck {
            side: Side::Cpu,
            errors: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "cpu deck failed validation: a; b");
    }
}
