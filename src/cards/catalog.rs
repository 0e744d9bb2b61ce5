//! Card catalog: abilities, combos and name aliases.
//!
//! The engine never reaches for global tables. Everything it knows about
//! named cards comes through the `CardCatalog` trait, so tests can swap in
//! a fixture catalog and the host can load its own data.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::ability::{Ability, AbilityCategory, AbilityEffect};
use super::card::Rarity;
use super::combo::{BonusKind, BonusTarget, Combo, ComboBonus};

/// Read-only card data consumed by the engine.
pub trait CardCatalog {
    /// Canonical lookup key for a card name: lowercase, trimmed, de-aliased.
    fn resolve_name(&self, name: &str) -> String;

    /// Ability registered for a canonical name.
    fn ability(&self, resolved_name: &str) -> Option<&Ability>;

    /// Ability every VibeFID card of this rarity carries.
    fn vibefid_ability(&self, rarity: Rarity) -> Option<&Ability>;

    /// All combos, in priority order.
    fn combos(&self) -> &[Combo];
}

impl<T: CardCatalog + ?Sized> CardCatalog for &T {
    fn resolve_name(&self, name: &str) -> String {
        (**self).resolve_name(name)
    }

    fn ability(&self, resolved_name: &str) -> Option<&Ability> {
        (**self).ability(resolved_name)
    }

    fn vibefid_ability(&self, rarity: Rarity) -> Option<&Ability> {
        (**self).vibefid_ability(rarity)
    }

    fn combos(&self) -> &[Combo] {
        (**self).combos()
    }
}

impl<T: CardCatalog + ?Sized> CardCatalog for Arc<T> {
    fn resolve_name(&self, name: &str) -> String {
        (**self).resolve_name(name)
    }

    fn ability(&self, resolved_name: &str) -> Option<&Ability> {
        (**self).ability(resolved_name)
    }

    fn vibefid_ability(&self, rarity: Rarity) -> Option<&Ability> {
        (**self).vibefid_ability(rarity)
    }

    fn combos(&self) -> &[Combo] {
        (**self).combos()
    }
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use vibe_clash::cards::{Ability, AbilityCategory, AbilityEffect, CardCatalog, Rarity, StaticCatalog};
///
/// let mut catalog = StaticCatalog::new();
/// catalog.register_ability(
///     "Casa",
///     Ability::new("Home Advantage", AbilityCategory::Support, Rarity::Common, AbilityEffect::BuffIfFirst(20)),
/// );
/// catalog.register_alias("home", "casa");
///
/// assert_eq!(catalog.resolve_name("  HOME "), "casa");
/// assert!(catalog.ability("casa").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    abilities: FxHashMap<String, Ability>,
    vibefid: FxHashMap<Rarity, Ability>,
    aliases: FxHashMap<String, String>,
    combos: Vec<Combo>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ability under a card name.
    ///
    /// Panics if the name already has one.
    pub fn register_ability(&mut self, card_name: &str, ability: Ability) {
        let key = normalize(card_name);
        if self.abilities.contains_key(&key) {
            panic!("Ability for {key:?} already registered");
        }
        self.abilities.insert(key, ability);
    }

    /// Register the ability VibeFID cards of a rarity carry.
    pub fn register_vibefid(&mut self, rarity: Rarity, ability: Ability) {
        self.vibefid.insert(rarity, ability);
    }

    /// Map an alternate spelling to a canonical name.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases.insert(normalize(alias), normalize(canonical));
    }

    /// Append a combo. Earlier combos win when several fire in one lane.
    pub fn register_combo(&mut self, combo: Combo) {
        self.combos.push(combo);
    }

    /// Number of named abilities.
    #[must_use]
    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// The live game's catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        register_standard_aliases(&mut catalog);
        register_standard_abilities(&mut catalog);
        register_vibefid_abilities(&mut catalog);
        register_standard_combos(&mut catalog);
        catalog
    }
}

impl CardCatalog for StaticCatalog {
    fn resolve_name(&self, name: &str) -> String {
        let key = normalize(name);
        match self.aliases.get(&key) {
            Some(canonical) => canonical.clone(),
            None => key,
        }
    }

    fn ability(&self, resolved_name: &str) -> Option<&Ability> {
        self.abilities.get(resolved_name)
    }

    fn vibefid_ability(&self, rarity: Rarity) -> Option<&Ability> {
        self.vibefid.get(&rarity)
    }

    fn combos(&self) -> &[Combo] {
        &self.combos
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn register_standard_aliases(catalog: &mut StaticCatalog) {
    for (alias, canonical) in [
        ("proxy", "slaterg"),
        ("filthy", "don filthy"),
        ("vlad", "vlady"),
        ("shill", "shills"),
        ("beto", "betobutter"),
        ("lombra", "lombra jr"),
        ("vibe", "vibe intern"),
        ("jack", "jack the sniper"),
        ("horsefacts", "horsefarts"),
        ("jc", "jc denton"),
        ("nicogay", "nico"),
        ("chilli", "chilipepper"),
        ("clawdmolt", "clawdmoltopenbot"),
        ("clawdmolt openbot", "clawdmoltopenbot"),
    ] {
        catalog.register_alias(alias, canonical);
    }
}

fn register_standard_abilities(catalog: &mut StaticCatalog) {
    use AbilityCategory::*;
    use AbilityEffect::*;

    let entries = [
        ("claude", "Computing", Offensive, Rarity::Common, BuffPerCardInPlay(3), "+3 power for each card in play"),
        ("casa", "Home Advantage", Support, Rarity::Common, BuffIfFirst(20), "+20 power if played first in this lane"),
        ("nico", "Legendary Status", Offensive, Rarity::Legendary, DoubleIfLosing, "Double power while losing this lane"),
        ("jc denton", "Nano Augmentation", Support, Rarity::Rare, BuffPerTurn(5), "+5 power every turn"),
        ("anon", "Hidden Identity", Control, Rarity::Mythic, Untargetable { buff_per_turn: 10 }, "Immune; +10 power each turn"),
        ("vitalik jumpterin", "Gas Optimization", Economy, Rarity::Mythic, GasOptimization { energy_per_turn: 1 }, "Saves gas every turn"),
        ("ventra", "Diamond Hands", Support, Rarity::Epic, DiamondHands { bonus: 25 }, "Cannot lose power; +25 power"),
        ("lombra jr", "Dick Knowledge", Offensive, Rarity::Rare, BuffPerCardsPlayed(8), "+8 power per card you have in play"),
        ("vibe intern", "Team Spirit", Support, Rarity::Common, BuffLane(10), "+10 power to each other friendly card here"),
        ("melted", "Liquidity", Economy, Rarity::Rare, GainEnergy(2), "Gain 2 energy this turn"),
        ("rachel", "Deal Flow", Economy, Rarity::Epic, Draw(1), "Draw a card"),
        ("0xdeployer", "Fresh Deploy", Economy, Rarity::Epic, Draw(2), "Draw two cards"),
        ("linux", "Open Source", Offensive, Rarity::Rare, BuffSelf(25), "+25 power"),
        ("beeper", "Signal Boost", Support, Rarity::Epic, BuffAdjacent(15), "+15 power to other friendly cards here"),
        ("loground", "Underground", Support, Rarity::Rare, BuffOtherLanes(10), "+10 power to friendly cards in other lanes"),
        ("shills", "Shill Campaign", Support, Rarity::Common, BuffWeakest(20), "+20 power to your weakest card"),
        ("jack the sniper", "Snipe Shot", Offensive, Rarity::Rare, DebuffEnemyInLane(20), "-20 power to a random enemy card here"),
        ("chilipepper", "Spicy Burn", Offensive, Rarity::Epic, DebuffLane(10), "-10 power to every enemy card here"),
        ("landmine", "Landmine", Offensive, Rarity::Rare, DebuffStrongest(30), "-30 power to the strongest enemy card"),
        ("horsefarts", "Stolen Power", Control, Rarity::Rare, StealPower(15), "Steal up to 15 power from an enemy card here"),
        ("jesse", "Protocol Override", Control, Rarity::Mythic, DestroyHighestEnemy { gain_power: true }, "Destroy the strongest enemy card and gain its power"),
        ("john porn", "Five Finger Discount", Control, Rarity::Common, StealOnSkip, "If the enemy skips a turn, steal its strongest card at half power"),
    ];

    for (card, name, category, rarity, effect, description) in entries {
        catalog.register_ability(card, Ability::new(name, category, rarity, effect).described(description));
    }
}

fn register_vibefid_abilities(catalog: &mut StaticCatalog) {
    use AbilityEffect::*;

    let entries = [
        (Rarity::Common, "First Cast", FirstCast(5), "+5 power for each card already played"),
        (Rarity::Rare, "Reply Guy", ReplyGuy, "Copy 50% power from strongest friendly in lane"),
        (Rarity::Epic, "Verified", DoubleIfLosing, "Double power if losing lane"),
        (Rarity::Legendary, "Ratio", Ratio, "Power becomes equal to strongest card on field"),
        (Rarity::Mythic, "Doxxed", Doxxed, "Add total power of all enemy cards in this lane"),
    ];

    for (rarity, name, effect, description) in entries {
        catalog.register_vibefid(
            rarity,
            Ability::new(name, AbilityCategory::Wildcard, rarity, effect).described(description),
        );
    }
}

fn register_standard_combos(catalog: &mut StaticCatalog) {
    use BonusKind::{Power, PowerPercent, Steal};
    use BonusTarget::{AllLanes, EnemyLane, Lane, Members};

    let bonus = |kind, value, target| ComboBonus { kind, value, target };

    let combos = [
        Combo::new("romero_family", "Romero Dynasty", &["dan romero", "goofy romero"], bonus(Power, 60, Members)),
        Combo::new("crypto_kings", "Crypto Kings", &["brian armstrong", "vitalik jumpterin"], bonus(Power, 80, Lane)),
        Combo::new("mythic_assembly", "Mythic Assembly", &["neymar", "anon", "linda xied", "jesse"], bonus(Power, 100, Members)).with_min_cards(2),
        Combo::new("legends_unite", "Legends Unite", &["nico", "ye"], bonus(Power, 70, Members)),
        Combo::new("ai_bros", "AI Takeover", &["claude", "groko", "gaypt"], bonus(Power, 50, Members)).with_min_cards(2),
        Combo::new("scam_squad", "Scam Squad", &["shills", "landmine"], bonus(Steal, 25, EnemyLane)),
        Combo::new("degen_trio", "Degen Trio", &["nftkid", "john porn"], bonus(PowerPercent, 100, Members)),
        Combo::new("vibe_team", "Vibe Team", &["vibe intern", "beeper", "jc denton"], bonus(Power, 50, Lane)).with_min_cards(2),
        Combo::new("dirty_duo", "Dirty Duo", &["don filthy", "vlady"], bonus(Steal, 40, EnemyLane)),
        Combo::new("code_masters", "Code Masters", &["horsefarts", "0xdeployer", "linux"], bonus(Power, 45, Members)).with_min_cards(2),
        Combo::new("content_creators", "Content Creators", &["pooster", "qrcodo"], bonus(Power, 40, Members)),
        Combo::new("chaos_agents", "Chaos Agents", &["tukka", "brainpasta", "chilipepper"], bonus(Power, 60, AllLanes)).with_min_cards(2),
        Combo::new("sniper_support", "Sniper Elite", &["jack the sniper", "loground"], bonus(Steal, 35, EnemyLane)),
        Combo::new("money_makers", "Money Makers", &["melted", "rachel"], bonus(Power, 40, Lane)),
        Combo::new("underdog_uprising", "Underdog Uprising", &["ink", "casa", "thosmur"], bonus(PowerPercent, 80, Members)).with_min_cards(2),
        Combo::new("parallel", "Parallel", &["rizkybegitu", "bradymck"], bonus(PowerPercent, 100, Members)),
        Combo::new("royal_brothers", "Royal Brothers", &["antonio", "miguel"], bonus(PowerPercent, 100, Members)),
        Combo::new("philosopher_chad", "Philosopher Chad", &["sartocrates", "zurkchad"], bonus(Power, 60, Members)),
        Combo::new("scaling_masters", "Scaling Masters", &["ventra", "morlacos"], bonus(PowerPercent, 100, Members)),
        Combo::new("christmas_spirit", "Christmas Spirit", &["naughty santa", "gozaru"], bonus(Power, 40, Lane)),
        Combo::new("shadow_network", "Shadow Network", &["lombra jr", "slaterg"], bonus(Steal, 30, EnemyLane)),
        Combo::new("pixel_artists", "Pixel Artists", &["smolemaru", "joonx"], bonus(Power, 35, Members)),
        Combo::new("dirty_money", "Dirty Money", &["scum", "betobutter"], bonus(Steal, 40, EnemyLane)),
    ];

    for combo in combos {
        catalog.register_combo(combo);
    }
}
