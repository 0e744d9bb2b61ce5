//! Card abilities.
//!
//! Abilities come from the catalog and only ever apply to identity cards
//! (VBMS/VibeFID). Ongoing effects are re-evaluated against the board on
//! every recompute. On-reveal effects fire once, when the card is played,
//! and leave their result on the cards they touched. Skip triggers fire at
//! the end of a turn in which the opponent committed nothing.

use serde::{Deserialize, Serialize};

use super::card::Rarity;

/// When an ability acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTiming {
    /// Once, as the card is committed to a lane.
    OnReveal,
    /// Continuously, as a power bonus recomputed from the board.
    Ongoing,
    /// At turn end, if the opponent committed no cards that turn.
    OnEnemySkip,
}

/// Design role of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityCategory {
    Offensive,
    Support,
    Control,
    Economy,
    Wildcard,
}

/// What an ability does.
///
/// "Board power" below is a committed card's effective power plus whatever
/// on-reveal effects have done to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    // Ongoing.
    /// +v for every card on the board, both sides.
    BuffPerCardInPlay(u32),
    /// +v × current turn.
    BuffPerTurn(u32),
    /// +v for every other friendly card in this lane (lane-wide aura).
    BuffLane(u32),
    /// +v if this was the first friendly card committed to its lane.
    BuffIfFirst(u32),
    /// Adds its own power again while its side is losing the lane.
    DoubleIfLosing,
    /// Cannot be targeted by enemy effects; grows by `buff_per_turn` × turn.
    Untargetable { buff_per_turn: u32 },
    /// Gas savings converted to power: 5 × `energy_per_turn` × turn.
    GasOptimization { energy_per_turn: u32 },
    /// Enemy effects cannot lower its power; flat `bonus`.
    DiamondHands { bonus: u32 },
    /// +v for every friendly card on the board.
    BuffPerCardsPlayed(u32),
    /// +50% of the strongest other friendly card in this lane.
    ReplyGuy,

    // On reveal.
    /// +v for every card committed before this one, anywhere.
    FirstCast(u32),
    /// Rises to the board power of the strongest other card on the field.
    Ratio,
    /// + total board power of the enemy cards in this lane.
    Doxxed,
    /// Gain n energy this turn.
    GainEnergy(u32),
    /// Draw n cards.
    Draw(u32),
    /// +v to this card.
    BuffSelf(u32),
    /// +v to every other friendly card in this lane.
    BuffAdjacent(u32),
    /// +v to every friendly card in the other lanes.
    BuffOtherLanes(u32),
    /// +v to the weakest other friendly card on the board.
    BuffWeakest(u32),
    /// -v to one random enemy card in this lane.
    DebuffEnemyInLane(u32),
    /// -v to every enemy card in this lane.
    DebuffLane(u32),
    /// -v to the strongest enemy card on the board.
    DebuffStrongest(u32),
    /// Take up to v power from a random enemy card in this lane.
    StealPower(u32),
    /// Remove the strongest enemy card from the board, optionally gaining
    /// its board power.
    DestroyHighestEnemy { gain_power: bool },

    // On enemy skip.
    /// Take the strongest enemy card into this lane at half power.
    StealOnSkip,
}

impl AbilityEffect {
    /// When this effect acts.
    #[must_use]
    pub fn timing(&self) -> AbilityTiming {
        use AbilityEffect::*;

        match self {
            FirstCast(_) | Ratio | Doxxed | GainEnergy(_) | Draw(_) | BuffSelf(_) | BuffAdjacent(_)
            | BuffOtherLanes(_) | BuffWeakest(_) | DebuffEnemyInLane(_) | DebuffLane(_)
            | DebuffStrongest(_) | StealPower(_) | DestroyHighestEnemy { .. } => AbilityTiming::OnReveal,
            StealOnSkip => AbilityTiming::OnEnemySkip,
            BuffPerCardInPlay(_) | BuffPerTurn(_) | BuffLane(_) | BuffIfFirst(_) | DoubleIfLosing
            | Untargetable { .. } | GasOptimization { .. } | DiamondHands { .. }
            | BuffPerCardsPlayed(_) | ReplyGuy => AbilityTiming::Ongoing,
        }
    }
}

/// A catalog ability record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub timing: AbilityTiming,
    pub category: AbilityCategory,
    pub rarity: Rarity,
    pub effect: AbilityEffect,
}

impl Ability {
    /// Create an ability. Timing is derived from the effect.
    pub fn new(
        name: impl Into<String>,
        category: AbilityCategory,
        rarity: Rarity,
        effect: AbilityEffect,
    ) -> Self {
        let timing = effect.timing();
        Self {
            name: name.into(),
            description: String::new(),
            timing,
            category,
            rarity,
            effect,
        }
    }

    /// Attach flavor text.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.timing == AbilityTiming::Ongoing
    }

    #[must_use]
    pub fn is_on_reveal(&self) -> bool {
        self.timing == AbilityTiming::OnReveal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_follows_effect() {
        let draw = Ability::new("Scout", AbilityCategory::Economy, Rarity::Rare, AbilityEffect::Draw(1));
        assert_eq!(draw.timing, AbilityTiming::OnReveal);
        assert!(!draw.is_ongoing());

        let aura = Ability::new("Aura", AbilityCategory::Support, Rarity::Epic, AbilityEffect::BuffLane(10))
            .described("+10 to friends here");
        assert!(aura.is_ongoing());
        assert_eq!(aura.description, "+10 to friends here");
    }

    #[test]
    fn test_vibefid_snapshots_fire_on_reveal() {
        for effect in [AbilityEffect::FirstCast(5), AbilityEffect::Ratio, AbilityEffect::Doxxed] {
            let ability = Ability::new("fid", AbilityCategory::Wildcard, Rarity::Mythic, effect);
            assert!(ability.is_on_reveal(), "{:?}", ability.effect);
        }

        let thief = Ability::new("Thief", AbilityCategory::Control, Rarity::Epic, AbilityEffect::StealOnSkip);
        assert_eq!(thief.timing, AbilityTiming::OnEnemySkip);
        assert!(!thief.is_ongoing() && !thief.is_on_reveal());
    }
}
