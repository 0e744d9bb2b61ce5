//! Ability and combo resolution, and lane power computation.
//!
//! `Resolver` wraps a [`CardCatalog`] together with the filler power rule
//! and answers every "how strong is this" question the engine and the AI
//! ask. It holds no board state of its own: every bonus is recomputed from
//! the lanes it is handed, so a card that leaves the board takes its
//! bonuses with it on the next recompute.
//!
//! ## Lane power
//!
//! A card's *board power* is its effective power plus the modifier left by
//! on-reveal effects, floored at 0. For each side of a lane:
//!
//! ```text
//! base  = Σ (board + ongoing + combo + lane effect)   over the side's cards
//!       + Σ (n - 1) × v                                over BuffLane(v) cards (n = side's cards)
//!       - enemy_steal × n                              floored at 0
//! power = base + Σ board power of DoubleIfLosing cards, if base < enemy base
//! ```
//!
//! `SwapSides` and `CopyEnemy` lanes then rewrite the pair. DoubleIfLosing
//! compares the `base` values of the same recompute, so repeating a
//! recompute over an unchanged board gives the same powers.

use smallvec::SmallVec;
use tracing::trace;

use crate::battle::{CardContext, Committed, Lane};
use crate::cards::{
    Ability, AbilityEffect, BonusKind, BonusTarget, Card, CardCatalog, CardKind, ComboMatch,
};
use crate::core::{BattleConfig, Side, SideMap};

/// Percent of the strongest friendly card a ReplyGuy card copies.
const REPLY_GUY_PERCENT: u64 = 50;

/// Power per energy saved for GasOptimization.
const GAS_POWER_PER_ENERGY: u32 = 5;

/// Resolves abilities, combos and lane powers against a catalog.
#[derive(Clone, Debug)]
pub struct Resolver<C> {
    catalog: C,
    filler_percent: u32,
}

impl<C: CardCatalog> Resolver<C> {
    /// Create a resolver using the config's filler power rule.
    pub fn new(catalog: C, config: &BattleConfig) -> Self {
        Self {
            catalog,
            filler_percent: config.filler_power_percent,
        }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Power a card contributes before bonuses.
    #[must_use]
    pub fn effective_power(&self, card: &Card) -> u32 {
        card.effective_power_with(self.filler_percent)
    }

    /// Effective power plus on-reveal modifiers, floored at 0.
    #[must_use]
    pub fn card_power(&self, committed: &Committed) -> u32 {
        let power = i64::from(self.effective_power(&committed.card)) + i64::from(committed.modifier);
        clamp_power(power)
    }

    /// Energy needed to play a card.
    #[must_use]
    pub fn energy_cost(&self, card: &Card) -> u32 {
        card.energy_cost()
    }

    /// Canonical catalog name of a card, if it has one.
    pub fn resolved_name(&self, card: &Card) -> Option<String> {
        card.name
            .as_deref()
            .map(|name| self.catalog.resolve_name(name))
            .filter(|name| !name.is_empty())
    }

    /// Ability carried by a card.
    ///
    /// Only identity cards have abilities. A named catalog entry wins; a
    /// VibeFID card without one falls back to its rarity ability.
    pub fn resolve_ability(&self, card: &Card) -> Option<&Ability> {
        match card.kind {
            CardKind::Nothing | CardKind::Other => None,
            CardKind::Vbms => self
                .resolved_name(card)
                .and_then(|name| self.catalog.ability(&name)),
            CardKind::VibeFid => self
                .resolved_name(card)
                .and_then(|name| self.catalog.ability(&name))
                .or_else(|| self.catalog.vibefid_ability(card.rarity)),
        }
    }

    /// Every combo satisfied by `card` together with `context` that the card
    /// takes part in, either as a named member or as a wildcard.
    ///
    /// `card` may or may not already be in `context`.
    pub fn resolve_combos<'a>(
        &self,
        card: &Card,
        context: impl IntoIterator<Item = &'a Card>,
    ) -> Vec<ComboMatch> {
        let mut group: Vec<&Card> = context.into_iter().filter(|c| c.id != card.id).collect();
        group.push(card);

        let (names, wildcards) = self.combo_inputs(group);
        let own_name = self.resolved_name(card);

        self.catalog
            .combos()
            .iter()
            .filter_map(|combo| combo.evaluate(names.iter().map(String::as_str), wildcards))
            .filter(|found| match (&own_name, card.kind) {
                (_, CardKind::VibeFid) if found.wildcards_used > 0 => true,
                (Some(name), _) => found.includes(name),
                (None, _) => false,
            })
            .collect()
    }

    /// The single combo active for one lane side.
    ///
    /// If any VibeFID card there was committed for a combo, the first
    /// satisfied combo among the chosen ones wins, and none is active if no
    /// chosen combo is satisfied. Otherwise the first satisfied combo in
    /// catalog order wins.
    pub fn active_combo(&self, cards: &[Committed]) -> Option<ComboMatch> {
        let (names, wildcards) = self.combo_inputs(cards.iter().map(|c| &c.card));
        let chosen: SmallVec<[&str; 2]> = cards
            .iter()
            .filter(|c| c.card.kind == CardKind::VibeFid)
            .filter_map(|c| c.combo_choice.as_deref())
            .collect();

        self.catalog
            .combos()
            .iter()
            .filter(|combo| chosen.is_empty() || chosen.contains(&combo.id.as_str()))
            .find_map(|combo| combo.evaluate(names.iter().map(String::as_str), wildcards))
    }

    /// Combo power a card receives from its lane side's active combo.
    #[must_use]
    pub fn combo_bonus(&self, card: &Card, combo: &ComboMatch, side_cards: usize) -> u32 {
        let is_member = self
            .resolved_name(card)
            .is_some_and(|name| combo.includes(&name));
        let bonus = combo.bonus;

        match (bonus.kind, bonus.target) {
            (BonusKind::Steal, _) | (_, BonusTarget::EnemyLane) => 0,
            (BonusKind::Power, _) if is_member => bonus.value,
            (BonusKind::PowerPercent, _) if is_member => {
                (u64::from(card.power) * u64::from(bonus.value) / 100) as u32
            }
            (BonusKind::Power, BonusTarget::Lane) if side_cards > 0 => {
                bonus.value / side_cards as u32
            }
            _ => 0,
        }
    }

    /// Ongoing power bonus for a committed card, computed from the board
    /// as it stands.
    ///
    /// Zero for cards without an ongoing ability. DoubleIfLosing is not
    /// included: it depends on the lane totals and is added by
    /// [`Resolver::lane_powers`].
    pub fn ongoing_bonus(
        &self,
        committed: &Committed,
        lane_index: usize,
        lanes: &[Lane],
        turn: u32,
        side: Side,
    ) -> u32 {
        let Some(ability) = self.resolve_ability(&committed.card) else {
            return 0;
        };
        if !ability.is_ongoing() {
            return 0;
        }
        let Some(lane) = lanes.get(lane_index) else {
            return 0;
        };
        let card = &committed.card;

        match ability.effect {
            AbilityEffect::BuffPerCardInPlay(v) => {
                let on_board: usize = lanes.iter().map(Lane::total_cards).sum();
                v.saturating_mul(on_board as u32)
            }
            AbilityEffect::BuffPerTurn(v) => v.saturating_mul(turn),
            AbilityEffect::BuffIfFirst(v) => {
                let first = lane.cards(side).first().map(|c| &c.card.id);
                if first == Some(&card.id) {
                    v
                } else {
                    0
                }
            }
            AbilityEffect::Untargetable { buff_per_turn } => buff_per_turn.saturating_mul(turn),
            AbilityEffect::GasOptimization { energy_per_turn } => energy_per_turn
                .saturating_mul(turn)
                .saturating_mul(GAS_POWER_PER_ENERGY),
            AbilityEffect::DiamondHands { bonus } => bonus,
            AbilityEffect::BuffPerCardsPlayed(v) => {
                let friendly: usize = lanes.iter().map(|l| l.card_count(side)).sum();
                v.saturating_mul(friendly as u32)
            }
            AbilityEffect::ReplyGuy => {
                let strongest = lane
                    .cards(side)
                    .iter()
                    .filter(|c| c.card.id != card.id)
                    .map(|c| self.card_power(c))
                    .max()
                    .unwrap_or(0);
                (u64::from(strongest) * REPLY_GUY_PERCENT / 100) as u32
            }
            // Lane-wide aura, applied once per lane side in `base_power`.
            AbilityEffect::BuffLane(_) => 0,
            // Compared against the lane totals in `lane_powers`.
            AbilityEffect::DoubleIfLosing => 0,
            // On-reveal and skip effects never get past `is_ongoing`.
            _ => 0,
        }
    }

    /// Recompute both sides' power for every lane.
    ///
    /// Reads only the committed cards and lane effects; the caller writes
    /// the result back. Cached powers are never consulted.
    pub fn lane_powers(&self, lanes: &[Lane], turn: u32) -> Vec<SideMap<u32>> {
        lanes
            .iter()
            .map(|lane| {
                let combos = SideMap::new(|side| self.active_combo(lane.cards(side)));
                let steal = combos.map(|_, combo| match combo {
                    Some(found) if found.bonus.kind == BonusKind::Steal => found.bonus.value,
                    _ => 0,
                });

                let base = SideMap::new(|side| {
                    let raw = self.base_power(lane, lanes, turn, side, combos[side].as_ref());
                    let drained = i64::from(steal[side.opponent()]) * lane.card_count(side) as i64;
                    (raw - drained).max(0)
                });

                let with_underdogs = SideMap::new(|side| {
                    if base[side] < base[side.opponent()] {
                        base[side] + self.losing_bonus(lane.cards(side))
                    } else {
                        base[side]
                    }
                });

                let (player, cpu) = lane
                    .effect()
                    .adjust_totals(with_underdogs[Side::Player], with_underdogs[Side::Cpu]);
                let powers = SideMap::from_pair(clamp_power(player), clamp_power(cpu));

                trace!(
                    lane = lane.index(),
                    effect = %lane.effect(),
                    player = powers[Side::Player],
                    cpu = powers[Side::Cpu],
                    "lane recomputed"
                );
                powers
            })
            .collect()
    }

    /// Strongest board power a side has in a lane, 0 if it has no cards.
    #[must_use]
    pub fn highest_card(&self, lane: &Lane, side: Side) -> u32 {
        lane.cards(side).iter().map(|c| self.card_power(c)).max().unwrap_or(0)
    }

    /// Lane power before steal, DoubleIfLosing and total rewrites.
    fn base_power(
        &self,
        lane: &Lane,
        lanes: &[Lane],
        turn: u32,
        side: Side,
        combo: Option<&ComboMatch>,
    ) -> i64 {
        let cards = lane.cards(side);
        let count = cards.len();
        let effect = lane.effect();

        let side_powers: SmallVec<[u32; 4]> = cards.iter().map(|c| self.card_power(c)).collect();
        let enemy = lane.cards(side.opponent());
        let enemy_total: u64 = enemy.iter().map(|c| u64::from(self.card_power(c))).sum();

        let per_card: i64 = cards
            .iter()
            .enumerate()
            .map(|(position, committed)| {
                let combo_bonus = combo.map_or(0, |found| self.combo_bonus(&committed.card, found, count));
                let lane_bonus = effect.card_bonus(&CardContext {
                    card: &committed.card,
                    side,
                    power: side_powers[position],
                    position,
                    side_powers: &side_powers,
                    enemy_count: enemy.len(),
                    enemy_total,
                    turn,
                });
                i64::from(side_powers[position])
                    + i64::from(self.ongoing_bonus(committed, lane.index(), lanes, turn, side))
                    + i64::from(combo_bonus)
                    + lane_bonus
            })
            .sum();

        let aura: i64 = cards
            .iter()
            .filter_map(|committed| match self.resolve_ability(&committed.card) {
                Some(Ability {
                    effect: AbilityEffect::BuffLane(v),
                    ..
                }) => Some(i64::from(*v) * count.saturating_sub(1) as i64),
                _ => None,
            })
            .sum();

        per_card + aura
    }

    /// Board power DoubleIfLosing cards add to a side that is behind.
    fn losing_bonus(&self, cards: &[Committed]) -> i64 {
        cards
            .iter()
            .filter(|c| {
                matches!(
                    self.resolve_ability(&c.card),
                    Some(Ability {
                        effect: AbilityEffect::DoubleIfLosing,
                        ..
                    })
                )
            })
            .map(|c| i64::from(self.card_power(c)))
            .sum()
    }

    fn combo_inputs<'a>(&self, cards: impl IntoIterator<Item = &'a Card>) -> (SmallVec<[String; 8]>, usize) {
        let mut names = SmallVec::new();
        let mut wildcards = 0;
        for card in cards {
            if card.kind == CardKind::VibeFid {
                wildcards += 1;
            }
            if let Some(name) = self.resolved_name(card) {
                names.push(name);
            }
        }
        (names, wildcards)
    }
}

pub(crate) fn clamp_power(power: i64) -> u32 {
    power.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::LaneEffect;
    use crate::cards::{AbilityCategory, Combo, ComboBonus, Rarity, StaticCatalog};
    use crate::core::LANE_COUNT;

    fn fixture() -> StaticCatalog {
        let mut catalog = StaticCatalog::new();
        catalog.register_ability(
            "host",
            Ability::new("Host", AbilityCategory::Support, Rarity::Common, AbilityEffect::BuffIfFirst(20)),
        );
        catalog.register_ability(
            "crowd",
            Ability::new("Crowd", AbilityCategory::Support, Rarity::Rare, AbilityEffect::BuffLane(10)),
        );
        catalog.register_ability(
            "clock",
            Ability::new("Clock", AbilityCategory::Offensive, Rarity::Epic, AbilityEffect::BuffPerTurn(5)),
        );
        catalog.register_ability(
            "underdog",
            Ability::new("Underdog", AbilityCategory::Control, Rarity::Epic, AbilityEffect::DoubleIfLosing),
        );
        catalog.register_ability(
            "battery",
            Ability::new("Battery", AbilityCategory::Economy, Rarity::Rare, AbilityEffect::GainEnergy(2)),
        );
        catalog.register_vibefid(
            Rarity::Legendary,
            Ability::new("Ratio", AbilityCategory::Wildcard, Rarity::Legendary, AbilityEffect::Ratio),
        );
        catalog.register_alias("the host", "host");
        catalog.register_combo(Combo::new(
            "pair",
            "Pair",
            &["alpha", "beta"],
            ComboBonus {
                kind: BonusKind::Power,
                value: 30,
                target: BonusTarget::Members,
            },
        ));
        catalog.register_combo(Combo::new(
            "drain",
            "Drain",
            &["gamma", "delta"],
            ComboBonus {
                kind: BonusKind::Steal,
                value: 4,
                target: BonusTarget::EnemyLane,
            },
        ));
        catalog
    }

    fn resolver(catalog: &StaticCatalog) -> Resolver<&StaticCatalog> {
        Resolver::new(catalog, &BattleConfig::default())
    }

    fn board() -> Vec<Lane> {
        (0..LANE_COUNT).map(Lane::new).collect()
    }

    fn put(lanes: &mut [Lane], lane: usize, side: Side, card: Card) {
        let sequence = lanes.iter().map(Lane::total_cards).sum::<usize>() as u32;
        lanes[lane].commit(side, Committed::new(card, 1, lane, sequence));
    }

    #[test]
    fn test_effective_power_is_pure() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let card = Card::nothing("n", 15);
        assert_eq!(resolver.effective_power(&card), 7);
        assert_eq!(resolver.effective_power(&card), 7);
        assert_eq!(resolver.effective_power(&Card::vbms("v", 15)), 15);
    }

    #[test]
    fn test_resolve_ability() {
        let catalog = fixture();
        let resolver = resolver(&catalog);

        let named = Card::vbms("a", 10).named("  The Host ");
        assert_eq!(resolver.resolve_ability(&named).map(|a| a.name.as_str()), Some("Host"));

        let filler = Card::nothing("b", 10).named("host");
        assert!(resolver.resolve_ability(&filler).is_none());

        assert!(resolver.resolve_ability(&Card::vbms("c", 10)).is_none());
        assert!(resolver.resolve_ability(&Card::vbms("d", 10).named("nobody")).is_none());

        let fid = Card::new("e", CardKind::VibeFid, Rarity::Legendary, 40);
        assert_eq!(resolver.resolve_ability(&fid).map(|a| a.name.as_str()), Some("Ratio"));

        let named_fid = Card::new("f", CardKind::VibeFid, Rarity::Legendary, 40).named("clock");
        assert_eq!(resolver.resolve_ability(&named_fid).map(|a| a.name.as_str()), Some("Clock"));
    }

    #[test]
    fn test_resolve_combos() {
        let catalog = fixture();
        let resolver = resolver(&catalog);

        let alpha = Card::vbms("a", 10).named("Alpha");
        let beta = Card::vbms("b", 10).named("BETA");
        let other = Card::vbms("c", 10).named("gamma");

        let found = resolver.resolve_combos(&alpha, [&beta, &other]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].combo_id, "pair");

        assert!(resolver.resolve_combos(&alpha, [&other]).is_empty());

        let fid = Card::new("f", CardKind::VibeFid, Rarity::Rare, 10);
        let found = resolver.resolve_combos(&alpha, [&fid]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].wildcards_used, 1);

        let with_wildcard = resolver.resolve_combos(&fid, [&alpha]);
        assert!(with_wildcard.iter().any(|m| m.combo_id == "pair"));
    }

    #[test]
    fn test_member_combo_power() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Player, Card::vbms("a", 10).named("alpha"));
        put(&mut lanes, 0, Side::Player, Card::vbms("b", 10).named("beta"));

        let powers = resolver.lane_powers(&lanes, 1);
        assert_eq!(powers[0][Side::Player], 80);
        assert_eq!(powers[1][Side::Player], 0);
    }

    #[test]
    fn test_steal_floors_at_zero() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 1, Side::Cpu, Card::vbms("g", 1).named("gamma"));
        put(&mut lanes, 1, Side::Cpu, Card::vbms("d", 1).named("delta"));
        put(&mut lanes, 1, Side::Player, Card::vbms("p", 3));
        put(&mut lanes, 1, Side::Player, Card::vbms("q", 20));

        let powers = resolver.lane_powers(&lanes, 1);
        assert_eq!(powers[1][Side::Player], 23 - 8);
        assert_eq!(powers[1][Side::Cpu], 2);

        let mut weak = board();
        put(&mut weak, 0, Side::Cpu, Card::vbms("g", 1).named("gamma"));
        put(&mut weak, 0, Side::Cpu, Card::vbms("d", 1).named("delta"));
        put(&mut weak, 0, Side::Player, Card::vbms("p", 3));
        assert_eq!(resolver.lane_powers(&weak, 1)[0][Side::Player], 0);
    }

    #[test]
    fn test_buff_if_first_and_lane_aura() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 2, Side::Player, Card::vbms("h", 10).named("host"));
        put(&mut lanes, 2, Side::Player, Card::vbms("c", 10).named("crowd"));
        put(&mut lanes, 2, Side::Player, Card::vbms("x", 10));

        // 30 base + 20 first + 2 × 10 aura
        assert_eq!(resolver.lane_powers(&lanes, 1)[2][Side::Player], 70);
    }

    #[test]
    fn test_ongoing_recomputed_from_turn() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Cpu, Card::vbms("k", 10).named("clock"));

        let committed = &lanes[0].cards(Side::Cpu)[0];
        assert_eq!(resolver.ongoing_bonus(committed, 0, &lanes, 1, Side::Cpu), 5);
        assert_eq!(resolver.ongoing_bonus(committed, 0, &lanes, 4, Side::Cpu), 20);
    }

    #[test]
    fn test_double_if_losing_is_stable_across_recomputes() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Player, Card::vbms("u", 10).named("underdog"));
        put(&mut lanes, 0, Side::Cpu, Card::vbms("big", 50));

        let mut seen = Vec::new();
        for turn in 1..=5 {
            let powers = resolver.lane_powers(&lanes, 1);
            lanes[0].set_powers(powers[0].clone());
            seen.push(powers[0][Side::Player]);
            // Unrelated plays elsewhere must not flip the bonus.
            put(&mut lanes, 2, Side::Cpu, Card::vbms(format!("x{turn}").as_str(), 1));
        }
        assert_eq!(seen, [20, 20, 20, 20, 20]);
    }

    #[test]
    fn test_double_if_losing_only_when_behind_before_doubling() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 1, Side::Player, Card::vbms("u", 30).named("underdog"));
        put(&mut lanes, 1, Side::Cpu, Card::vbms("v", 30).named("underdog"));

        // Level lanes give neither side the bonus.
        assert_eq!(resolver.lane_powers(&lanes, 1)[1], SideMap::from_pair(30, 30));

        put(&mut lanes, 1, Side::Cpu, Card::vbms("w", 5));
        let powers = resolver.lane_powers(&lanes, 1);
        assert_eq!(powers[1], SideMap::from_pair(60, 35));
    }

    #[test]
    fn test_on_reveal_has_no_ongoing_bonus() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Player, Card::vbms("b", 10).named("battery"));
        let committed = &lanes[0].cards(Side::Player)[0];
        assert_eq!(resolver.ongoing_bonus(committed, 0, &lanes, 3, Side::Player), 0);
    }

    #[test]
    fn test_vibefid_snapshots_are_not_ongoing() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Player, Card::new("f", CardKind::VibeFid, Rarity::Legendary, 40));
        put(&mut lanes, 2, Side::Cpu, Card::vbms("big", 90));

        let committed = &lanes[0].cards(Side::Player)[0];
        assert_eq!(resolver.ongoing_bonus(committed, 0, &lanes, 1, Side::Player), 0);
        assert_eq!(resolver.lane_powers(&lanes, 1)[0][Side::Player], 40);
    }

    #[test]
    fn test_modifier_counts_and_floors() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes = board();
        put(&mut lanes, 0, Side::Player, Card::vbms("a", 20));
        put(&mut lanes, 0, Side::Player, Card::vbms("b", 20));
        lanes[0].cards_mut(Side::Player)[0].adjust(15);
        lanes[0].cards_mut(Side::Player)[1].adjust(-50);

        assert_eq!(resolver.card_power(&lanes[0].cards(Side::Player)[0]), 35);
        assert_eq!(resolver.card_power(&lanes[0].cards(Side::Player)[1]), 0);
        assert_eq!(resolver.lane_powers(&lanes, 1)[0][Side::Player], 35);
    }

    #[test]
    fn test_vibefid_combo_choice() {
        let mut catalog = fixture();
        catalog.register_combo(Combo::new(
            "trio",
            "Trio",
            &["alpha", "gamma"],
            ComboBonus {
                kind: BonusKind::Power,
                value: 5,
                target: BonusTarget::Members,
            },
        ));
        let resolver = resolver(&catalog);
        let alpha = Committed::new(Card::vbms("a", 10).named("alpha"), 1, 0, 0);
        let fid = Committed::new(Card::new("f", CardKind::VibeFid, Rarity::Rare, 10), 1, 0, 1);

        // Unchosen: first satisfied combo in catalog order.
        let free = resolver.active_combo(&[alpha.clone(), fid.clone()]);
        assert_eq!(free.map(|m| m.combo_id), Some("pair".to_string()));

        let chosen = resolver.active_combo(&[alpha.clone(), fid.clone().choosing("trio")]);
        assert_eq!(chosen.map(|m| m.combo_id), Some("trio".to_string()));

        // A choice that is not satisfied leaves the side without a combo.
        let unmet = resolver.active_combo(&[alpha, fid.choosing("drain")]);
        assert!(unmet.is_none());
    }

    #[test]
    fn test_lane_effect_terms() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes: Vec<Lane> = vec![
            Lane::with_effect(0, LaneEffect::BuffIfLosing(35)),
            Lane::with_effect(1, LaneEffect::DebuffPerTurn(12)),
            Lane::with_effect(2, LaneEffect::BuffFirst(40)),
        ];
        put(&mut lanes, 0, Side::Player, Card::vbms("a", 10));
        put(&mut lanes, 0, Side::Cpu, Card::vbms("b", 30));
        put(&mut lanes, 1, Side::Player, Card::vbms("c", 10));
        put(&mut lanes, 1, Side::Cpu, Card::vbms("d", 50));
        put(&mut lanes, 2, Side::Cpu, Card::vbms("e", 5));
        put(&mut lanes, 2, Side::Cpu, Card::vbms("f", 5));

        let powers = resolver.lane_powers(&lanes, 2);
        assert_eq!(powers[0], SideMap::from_pair(45, 30));
        // 10 - 24 floors at 0; 50 - 24.
        assert_eq!(powers[1], SideMap::from_pair(0, 26));
        assert_eq!(powers[2], SideMap::from_pair(0, 50));
    }

    #[test]
    fn test_swap_and_copy_rewrite_totals() {
        let catalog = fixture();
        let resolver = resolver(&catalog);
        let mut lanes: Vec<Lane> = vec![
            Lane::with_effect(0, LaneEffect::SwapSides),
            Lane::with_effect(1, LaneEffect::CopyEnemy),
            Lane::new(2),
        ];
        for lane in 0..2 {
            put(&mut lanes, lane, Side::Player, Card::vbms(format!("p{lane}").as_str(), 10));
            put(&mut lanes, lane, Side::Cpu, Card::vbms(format!("c{lane}").as_str(), 70));
        }

        let powers = resolver.lane_powers(&lanes, 1);
        assert_eq!(powers[0], SideMap::from_pair(70, 10));
        assert_eq!(powers[1], SideMap::from_pair(70, 70));
    }
}
