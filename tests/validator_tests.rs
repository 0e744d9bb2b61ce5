//! Deck validation tests.
//!
//! Property tests cover the composition rules over arbitrary decks; the
//! worked examples pin down exact totals.

use proptest::prelude::*;
use vibe_clash::{validate, validate_deck, BattleConfig, Card, CardKind, DeckError, Rarity};

fn arb_kind() -> impl Strategy<Value = CardKind> {
    prop_oneof![
        Just(CardKind::Vbms),
        Just(CardKind::VibeFid),
        Just(CardKind::Nothing),
        Just(CardKind::Other),
    ]
}

fn arb_rarity() -> impl Strategy<Value = Rarity> {
    prop_oneof![
        Just(Rarity::Common),
        Just(Rarity::Rare),
        Just(Rarity::Epic),
        Just(Rarity::Legendary),
        Just(Rarity::Mythic),
    ]
}

fn arb_deck(max_len: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec((arb_kind(), arb_rarity(), 0u32..5_000), 0..max_len).prop_map(|cards| {
        cards
            .into_iter()
            .enumerate()
            .map(|(i, (kind, rarity, power))| Card::new(format!("c{i}").as_str(), kind, rarity, power))
            .collect()
    })
}

fn deck(vbms: usize, vbms_power: u32, nothing: usize, nothing_power: u32) -> Vec<Card> {
    (0..vbms)
        .map(|i| Card::vbms(format!("v{i}").as_str(), vbms_power))
        .chain((0..nothing).map(|i| Card::nothing(format!("n{i}").as_str(), nothing_power)))
        .collect()
}

proptest! {
    #[test]
    fn prop_total_power_always_reported(cards in arb_deck(30)) {
        let report = validate(&cards);
        let expected: u64 = cards
            .iter()
            .map(|c| {
                if c.kind.is_identity() {
                    u64::from(c.power)
                } else {
                    u64::from(c.power) / 2
                }
            })
            .sum();
        prop_assert_eq!(report.total_power, expected);
        prop_assert_eq!(report.is_valid, report.errors.is_empty());
    }

    #[test]
    fn prop_wrong_size_is_invalid(cards in arb_deck(30)) {
        prop_assume!(cards.len() != 12);
        let report = validate(&cards);
        prop_assert!(!report.is_valid);
        prop_assert!(report.errors.iter().any(|e| matches!(e, DeckError::Size { .. })), "expected DeckError::Size");
    }

    #[test]
    fn prop_too_few_identity_is_invalid(cards in arb_deck(20)) {
        let identity = cards.iter().filter(|c| c.kind.is_identity()).count();
        prop_assume!(identity < 5);
        let report = validate(&cards);
        prop_assert!(!report.is_valid);
        prop_assert!(report.errors.iter().any(|e| matches!(e, DeckError::TooFewIdentity { .. })), "expected DeckError::TooFewIdentity");
    }

    #[test]
    fn prop_too_much_filler_is_invalid(cards in arb_deck(20)) {
        let filler = cards.iter().filter(|c| c.kind.is_filler()).count();
        prop_assume!(filler > 7);
        let report = validate(&cards);
        prop_assert!(!report.is_valid);
        prop_assert!(report.errors.iter().any(|e| matches!(e, DeckError::TooManyFiller { .. })), "expected DeckError::TooManyFiller");
    }

    #[test]
    fn prop_validation_is_deterministic(cards in arb_deck(16)) {
        prop_assert_eq!(validate(&cards), validate(&cards));
    }
}

#[test]
fn test_seven_vbms_five_nothing() {
    let report = validate(&deck(7, 20, 5, 10));
    assert!(report.is_valid);
    assert_eq!(report.total_power, 165);
}

#[test]
fn test_six_and_six() {
    let report = validate(&deck(6, 20, 6, 20));
    assert!(report.is_valid);
    assert_eq!(report.total_power, 180);
}

#[test]
fn test_four_vbms_eight_nothing_reports_both() {
    let report = validate(&deck(4, 20, 8, 10));
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| matches!(e, DeckError::TooFewIdentity { .. })));
    assert!(report.errors.iter().any(|e| matches!(e, DeckError::TooManyFiller { .. })));
    assert!(!report.errors.iter().any(|e| matches!(e, DeckError::Size { .. })));
}

#[test]
fn test_exact_boundaries() {
    assert!(validate(&deck(5, 20, 7, 10)).is_valid);
}

#[test]
fn test_custom_rules() {
    let config = BattleConfig {
        deck_size: 8,
        min_identity: 2,
        max_filler: 6,
        ..BattleConfig::default()
    };
    assert!(validate_deck(&deck(2, 10, 6, 10), &config).is_valid);
    assert!(!validate_deck(&deck(2, 10, 6, 10), &BattleConfig::default()).is_valid);
}
