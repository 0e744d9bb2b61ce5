//! Battle state machine tests against the standard catalog.

use proptest::prelude::*;
use vibe_clash::{
    Battle, BattleConfig, Card, CardId, CardKind, EngineError, GameRng, IllegalPlay, LaneEffect,
    LaneSetup, LogAction, MatchResult, Phase, Rarity, Side, StaticCatalog,
};

/// 8 VBMS + 4 Nothing, ids `{prefix}-0..11`, the first cards named.
fn named_deck(prefix: &str, names: &[&str], power: u32) -> Vec<Card> {
    (0..12)
        .map(|i| {
            let card = if i < 8 {
                Card::vbms(format!("{prefix}-{i}").as_str(), power)
            } else {
                Card::nothing(format!("{prefix}-{i}").as_str(), power)
            };
            match names.get(i) {
                Some(name) => card.named(*name),
                None => card,
            }
        })
        .collect()
}

fn plain_deck(prefix: &str) -> Vec<Card> {
    named_deck(prefix, &[], 20)
}

fn start(player: Vec<Card>, cpu: Vec<Card>, config: BattleConfig) -> Battle<StaticCatalog> {
    Battle::setup(StaticCatalog::standard(), config, player, cpu, &GameRng::new(42)).unwrap()
}

/// Opening hands hold every card when the hand is as big as the deck.
fn whole_hand() -> BattleConfig {
    BattleConfig::default()
        .with_opening_hand(12)
        .with_energy_curve(10, 0, 10)
}

fn id(s: &str) -> CardId {
    CardId::new(s)
}

#[test]
fn test_romero_combo_adds_member_bonus() {
    let player = named_deck("p", &["Dan Romero", "Goofy Romero"], 20);
    let mut battle = start(player, plain_deck("c"), whole_hand());

    battle.play_card(Side::Player, &id("p-0"), 0).unwrap();
    assert_eq!(battle.lanes()[0].power(Side::Player), 20);

    battle.play_card(Side::Player, &id("p-1"), 0).unwrap();
    assert_eq!(battle.lanes()[0].power(Side::Player), 40 + 2 * 60);
}

#[test]
fn test_vibefid_fills_combo_slot() {
    let mut player = named_deck("p", &["Dan Romero"], 20);
    player[1] = Card::new("p-fid", CardKind::VibeFid, Rarity::Common, 20);
    let mut battle = start(player, plain_deck("c"), whole_hand());

    battle.play_card(Side::Player, &id("p-0"), 1).unwrap();
    battle.play_card(Side::Player, &id("p-fid"), 1).unwrap();

    // Dan gets +60; the Common VibeFID's First Cast adds 5 per earlier card.
    assert_eq!(battle.lanes()[1].power(Side::Player), 20 + 60 + 20 + 5);
}

#[test]
fn test_steal_combo_drains_opponent_lane() {
    let cpu = named_deck("c", &["Don Filthy", "Vlad"], 20);
    let mut battle = start(plain_deck("p"), cpu, whole_hand());

    battle.play_card(Side::Player, &id("p-0"), 2).unwrap();
    battle.play_card(Side::Player, &id("p-1"), 2).unwrap();
    battle.play_card(Side::Cpu, &id("c-0"), 2).unwrap();
    assert_eq!(battle.lanes()[2].power(Side::Player), 40);

    battle.play_card(Side::Cpu, &id("c-1"), 2).unwrap();
    // Dirty Duo steals 40 per player card: 40 - 80 floors at 0.
    assert_eq!(battle.lanes()[2].power(Side::Player), 0);
    assert_eq!(battle.lanes()[2].power(Side::Cpu), 40);
}

#[test]
fn test_only_first_combo_counts() {
    // Romero Dynasty (listed first) and Legends Unite both fire.
    let player = named_deck("p", &["dan romero", "goofy romero", "nico", "ye"], 20);
    let mut battle = start(player, plain_deck("c"), whole_hand());
    for i in 0..4 {
        battle.play_card(Side::Player, &id(&format!("p-{i}")), 0).unwrap();
    }

    // 4 × 20 base, Romeros +60 each, no Legends Unite bonus. Nico is not
    // losing, so no DoubleIfLosing either.
    assert_eq!(battle.lanes()[0].power(Side::Player), 80 + 120);
}

#[test]
fn test_on_reveal_energy_and_draw() {
    let config = BattleConfig::default()
        .with_opening_hand(2)
        .with_energy_curve(10, 0, 10);
    // Shuffling would scramble which two cards are in hand, so give
    // every card an ability that makes the effect visible either way.
    let player: Vec<Card> = (0..12)
        .map(|i| {
            let name = if i % 2 == 0 { "melted" } else { "rachel" };
            Card::vbms(format!("p-{i}").as_str(), 10)
                .with_rarity(Rarity::Rare)
                .named(name)
        })
        .collect();
    let mut battle = start(player, plain_deck("c"), config);

    let card = battle.hand(Side::Player)[0].clone();
    let hand_before = battle.hand(Side::Player).len();
    battle.play_card(Side::Player, &card.id, 0).unwrap();

    match card.name.as_deref() {
        Some("melted") => {
            assert_eq!(battle.energy(Side::Player), 10 - 3 + 2);
            assert_eq!(battle.hand(Side::Player).len(), hand_before - 1);
        }
        _ => {
            assert_eq!(battle.energy(Side::Player), 10 - 3);
            assert_eq!(battle.hand(Side::Player).len(), hand_before);
        }
    }
}

#[test]
fn test_bonus_disappears_when_source_is_hidden() {
    // The Vibe Intern aura only exists while the intern is on the board.
    let cpu = named_deck("c", &["vibe intern"], 20);
    let mut battle = start(plain_deck("p"), cpu, whole_hand());

    battle.play_card(Side::Cpu, &id("c-1"), 0).unwrap();
    battle.play_card(Side::Cpu, &id("c-0"), 0).unwrap();
    assert_eq!(battle.lanes()[0].power(Side::Cpu), 40 + 10);

    // From the player's side the intern is still face-down this turn.
    let view = battle.view(Side::Player);
    assert_eq!(view.lanes[0].power(Side::Cpu), 0);
}

#[test]
fn test_exhausted_side_resolves_early() {
    let mut battle = start(plain_deck("p"), plain_deck("c"), whole_hand());

    // Free cards first, then as many paid cards as energy allows.
    let filler: Vec<CardId> = battle
        .hand(Side::Player)
        .iter()
        .filter(|c| c.kind.is_filler())
        .map(|c| c.id.clone())
        .collect();
    for card_id in filler {
        battle.play_card(Side::Player, &card_id, 0).unwrap();
    }
    assert!(!battle.is_exhausted(Side::Player));

    let mut turns = 0;
    let outcome = loop {
        turns += 1;
        let affordable: Vec<CardId> = battle
            .hand(Side::Player)
            .iter()
            .filter(|c| c.energy_cost() <= battle.energy(Side::Player))
            .map(|c| c.id.clone())
            .collect();
        for card_id in affordable {
            if battle.play_card(Side::Player, &card_id, 1).is_err() {
                break;
            }
        }
        if let Some(outcome) = battle.end_turn().unwrap() {
            break outcome;
        }
    };

    // 10 energy buys five 2-cost cards on turn 1 and the last three on turn 2.
    assert_eq!(turns, 2);
    assert_eq!(battle.phase(), Phase::Resolved);
    assert!(battle.is_exhausted(Side::Player));
    assert_eq!(outcome.turns_played, 2);
}

#[test]
fn test_log_records_the_match() {
    let mut battle = start(plain_deck("p"), plain_deck("c"), whole_hand());
    battle.play_card(Side::Player, &id("p-0"), 0).unwrap();
    battle.sacrifice(Side::Cpu, &id("c-8")).unwrap();
    let outcome = battle.resolve().unwrap();

    let actions: Vec<&LogAction> = battle
        .log()
        .iter()
        .filter(|e| !matches!(e.action, LogAction::Draw { .. }))
        .map(|e| &e.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            &LogAction::Play {
                card_id: id("p-0"),
                lane: 0,
                cost: 2
            },
            &LogAction::Sacrifice {
                card_id: id("c-8"),
                energy: 2
            },
            &LogAction::Resolved { winner: None },
        ]
    );
    assert_eq!(outcome.result, MatchResult::Tie);
}

#[test]
fn test_start_twice_is_fatal() {
    let mut battle = start(plain_deck("p"), plain_deck("c"), BattleConfig::default());
    let err = battle
        .start(plain_deck("p"), plain_deck("c"), &GameRng::new(1))
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        EngineError::InvalidStateTransition {
            operation: "start",
            phase: Phase::InProgress
        }
    ));
}

proptest! {
    /// Whatever a caller throws at `play_card`, a rejection leaves the
    /// battle exactly as it was.
    #[test]
    fn prop_rejected_plays_are_atomic(
        seed in any::<u64>(),
        attempts in prop::collection::vec((0usize..16, 0usize..5, any::<bool>()), 1..40),
    ) {
        let player: Vec<Card> = (0..12)
            .map(|i| {
                let card = if i < 7 {
                    Card::vbms(format!("p-{i}").as_str(), 10 + i as u32)
                } else {
                    Card::nothing(format!("p-{i}").as_str(), 10)
                };
                card.with_rarity(if i % 3 == 0 { Rarity::Mythic } else { Rarity::Common })
            })
            .collect();
        let mut battle = Battle::setup(
            StaticCatalog::standard(),
            BattleConfig::default(),
            player,
            plain_deck("c"),
            &GameRng::new(seed),
        )
        .unwrap();

        for (card, lane, sacrifice) in attempts {
            let card_id = id(&format!("p-{card}"));
            let hand = battle.hand(Side::Player).to_vec();
            let energy = battle.energy(Side::Player);
            let lanes = battle.lanes().clone();
            let log_len = battle.log().len();

            let result = if sacrifice {
                battle.sacrifice(Side::Player, &card_id).map(|_| ())
            } else {
                battle.play_card(Side::Player, &card_id, lane)
            };

            if let Err(err) = result {
                prop_assert!(err.as_illegal_play().is_some());
                prop_assert_eq!(battle.hand(Side::Player), hand.as_slice());
                prop_assert_eq!(battle.energy(Side::Player), energy);
                prop_assert_eq!(battle.lanes(), &lanes);
                prop_assert_eq!(battle.log().len(), log_len);
            }
        }
    }
}

#[test]
fn test_insufficient_energy_reports_amounts() {
    let player: Vec<Card> = (0..12)
        .map(|i| Card::vbms(format!("p-{i}").as_str(), 10).with_rarity(Rarity::Legendary))
        .collect();
    let mut battle = start(player, plain_deck("c"), BattleConfig::default());
    let card_id = battle.hand(Side::Player)[0].id.clone();

    let err = battle.play_card(Side::Player, &card_id, 0).unwrap_err();
    assert_eq!(
        err.as_illegal_play(),
        Some(&IllegalPlay::InsufficientEnergy { have: 1, need: 5 })
    );
}

fn logged(battle: &Battle<StaticCatalog>, action: &LogAction) -> bool {
    battle.log().iter().any(|e| &e.action == action)
}

#[test]
fn test_lane_effects_change_power_and_scoring() {
    let lanes = [LaneEffect::BuffFirst(40), LaneEffect::NoVictory, LaneEffect::DoubleVictory];
    let mut battle = start(plain_deck("p"), plain_deck("c"), whole_hand().with_lanes(LaneSetup::Fixed(lanes)));

    battle.play_card(Side::Player, &id("p-0"), 0).unwrap();
    battle.play_card(Side::Player, &id("p-1"), 0).unwrap();
    assert_eq!(battle.lanes()[0].power(Side::Player), 20 + 40 + 20);

    battle.play_card(Side::Player, &id("p-2"), 1).unwrap();
    battle.play_card(Side::Cpu, &id("c-0"), 2).unwrap();
    let outcome = battle.resolve().unwrap();

    // Lane 0 is worth 1, lane 1 nothing, lane 2 two: 2 of 3 is a majority.
    assert_eq!(outcome.victory_points[Side::Player], 1);
    assert_eq!(outcome.victory_points[Side::Cpu], 2);
    assert_eq!(outcome.lane_wins[Side::Player], 1);
    assert_eq!(outcome.result, MatchResult::Winner(Side::Cpu));
}

#[test]
fn test_destroy_on_reveal_takes_strongest_enemy() {
    let mut battle = start(named_deck("p", &["Jesse"], 20), named_deck("c", &[], 35), whole_hand());
    battle.play_card(Side::Cpu, &id("c-0"), 2).unwrap();
    battle.play_card(Side::Cpu, &id("c-8"), 1).unwrap();

    battle.play_card(Side::Player, &id("p-0"), 0).unwrap();
    assert_eq!(battle.lanes()[2].card_count(Side::Cpu), 0);
    assert_eq!(battle.lanes()[1].card_count(Side::Cpu), 1);
    assert_eq!(battle.lanes()[0].power(Side::Player), 20 + 35);
    assert!(logged(
        &battle,
        &LogAction::Destroyed {
            owner: Side::Cpu,
            card_id: id("c-0"),
            lane: 2
        }
    ));
}

#[test]
fn test_skip_turn_lets_thief_steal() {
    let mut battle = start(named_deck("p", &["John Porn"], 20), plain_deck("c"), whole_hand());
    battle.play_card(Side::Player, &id("p-0"), 1).unwrap();
    battle.play_card(Side::Cpu, &id("c-0"), 0).unwrap();
    battle.end_turn().unwrap();
    assert_eq!(battle.lanes()[0].card_count(Side::Cpu), 1);

    // Turn 2: the CPU commits nothing.
    battle.end_turn().unwrap();
    assert_eq!(battle.lanes()[0].card_count(Side::Cpu), 0);
    assert_eq!(battle.lanes()[1].card_count(Side::Player), 2);
    assert_eq!(battle.lanes()[1].power(Side::Player), 20 + 10);
    assert!(logged(
        &battle,
        &LogAction::Stolen {
            card_id: id("c-0"),
            from_lane: 0,
            to_lane: 1
        }
    ));
}

#[test]
fn test_vibefid_joins_chosen_combo_only() {
    let deck = || {
        let mut player = named_deck("p", &["Dan Romero"], 20);
        player[1] = Card::new("p-fid", CardKind::VibeFid, Rarity::Common, 20);
        player
    };

    let mut chosen = start(deck(), plain_deck("c"), whole_hand());
    chosen.play_card(Side::Player, &id("p-0"), 1).unwrap();
    chosen
        .play_vibefid(Side::Player, &id("p-fid"), 1, "romero_family")
        .unwrap();
    assert_eq!(chosen.lanes()[1].power(Side::Player), 20 + 60 + 20 + 5);

    // A choice whose members are missing turns the combo off.
    let mut elsewhere = start(deck(), plain_deck("c"), whole_hand());
    elsewhere.play_card(Side::Player, &id("p-0"), 1).unwrap();
    elsewhere
        .play_vibefid(Side::Player, &id("p-fid"), 1, "crypto_kings")
        .unwrap();
    assert_eq!(elsewhere.lanes()[1].power(Side::Player), 20 + 20 + 5);
}
