//! Card value objects.
//!
//! A `Card` is immutable once it enters a battle. Its *effective* power
//! (after the filler penalty) and its energy cost are derived on demand,
//! never written back.

use serde::{Deserialize, Serialize};

/// Identifier of a card within one deck instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collection a card comes from.
///
/// VBMS and VibeFID are *identity* cards: full power, abilities, combos.
/// Nothing and Other are *filler*: half power, free to play, sacrificable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Vbms,
    VibeFid,
    Nothing,
    Other,
}

impl CardKind {
    /// VBMS or VibeFID.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, CardKind::Vbms | CardKind::VibeFid)
    }

    /// Nothing or Other.
    #[must_use]
    pub const fn is_filler(self) -> bool {
        !self.is_identity()
    }
}

/// Rarity tier, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Base energy cost before foil discounts.
    #[must_use]
    pub const fn base_cost(self) -> u32 {
        match self {
            Rarity::Common => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
            Rarity::Mythic => 6,
        }
    }
}

/// Foil finish.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foil {
    #[default]
    None,
    Standard,
    Prize,
}

impl Foil {
    /// Percent of the base energy cost removed by this foil.
    #[must_use]
    pub const fn energy_discount_percent(self) -> u32 {
        match self {
            Foil::None => 0,
            Foil::Standard => 50,
            Foil::Prize => 100,
        }
    }
}

/// A card as it enters a battle.
///
/// `power` already includes any foil multiplier applied by the collection
/// layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub rarity: Rarity,
    pub power: u32,
    #[serde(default)]
    pub foil: Foil,
    #[serde(default)]
    pub name: Option<String>,
}

impl Card {
    /// Create an unnamed, non-foil card.
    pub fn new(id: impl Into<CardId>, kind: CardKind, rarity: Rarity, power: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            rarity,
            power,
            foil: Foil::None,
            name: None,
        }
    }

    /// Shorthand for a common VBMS card.
    pub fn vbms(id: impl Into<CardId>, power: u32) -> Self {
        Self::new(id, CardKind::Vbms, Rarity::Common, power)
    }

    /// Shorthand for a common Nothing card.
    pub fn nothing(id: impl Into<CardId>, power: u32) -> Self {
        Self::new(id, CardKind::Nothing, Rarity::Common, power)
    }

    /// Set the card name (used for ability and combo lookup).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the foil finish.
    #[must_use]
    pub fn with_foil(mut self, foil: Foil) -> Self {
        self.foil = foil;
        self
    }

    /// Set the rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Power after the filler penalty, given the percent filler cards keep.
    #[must_use]
    pub fn effective_power_with(&self, filler_percent: u32) -> u32 {
        match self.kind {
            CardKind::Vbms | CardKind::VibeFid => self.power,
            CardKind::Nothing | CardKind::Other => {
                // u64 keeps power * percent from overflowing.
                (u64::from(self.power) * u64::from(filler_percent) / 100) as u32
            }
        }
    }

    /// Energy needed to play this card.
    ///
    /// Filler is always free. Identity cards pay their rarity cost minus
    /// the foil discount, never less than 1.
    #[must_use]
    pub fn energy_cost(&self) -> u32 {
        match self.kind {
            CardKind::Nothing | CardKind::Other => 0,
            CardKind::Vbms | CardKind::VibeFid => {
                let base = self.rarity.base_cost();
                let kept = 100 - self.foil.energy_discount_percent();
                (base * kept / 100).max(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classes() {
        assert!(CardKind::Vbms.is_identity());
        assert!(CardKind::VibeFid.is_identity());
        assert!(CardKind::Nothing.is_filler());
        assert!(CardKind::Other.is_filler());
    }

    #[test]
    fn test_effective_power() {
        assert_eq!(Card::vbms("a", 21).effective_power_with(50), 21);
        assert_eq!(Card::nothing("b", 21).effective_power_with(50), 10);
        let other = Card::new("c", CardKind::Other, Rarity::Epic, 7);
        assert_eq!(other.effective_power_with(50), 3);
    }

    #[test]
    fn test_energy_cost_by_rarity() {
        let costs: Vec<_> = [
            Rarity::Common,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Mythic,
        ]
        .into_iter()
        .map(|r| Card::vbms("x", 10).with_rarity(r).energy_cost())
        .collect();

        assert_eq!(costs, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_foil_discount_floors_at_one() {
        let mythic = Card::vbms("m", 100).with_rarity(Rarity::Mythic);
        assert_eq!(mythic.clone().with_foil(Foil::Standard).energy_cost(), 3);
        assert_eq!(mythic.with_foil(Foil::Prize).energy_cost(), 1);

        let rare = Card::vbms("r", 10).with_rarity(Rarity::Rare).with_foil(Foil::Standard);
        assert_eq!(rare.energy_cost(), 1);
    }

    #[test]
    fn test_filler_is_free() {
        let card = Card::nothing("n", 500)
            .with_rarity(Rarity::Mythic)
            .with_foil(Foil::None);
        assert_eq!(card.energy_cost(), 0);
    }

    #[test]
    fn test_card_json_defaults() {
        let card: Card = serde_json::from_str(
            r#"{"id":"c1","kind":"Vbms","rarity":"Rare","power":20}"#,
        )
        .unwrap();
        assert_eq!(card.foil, Foil::None);
        assert_eq!(card.name, None);
        assert_eq!(card.id, CardId::new("c1"));
    }
}
