//! Multi-card combos.
//!
//! A combo lists member card names (already alias-resolved, lowercase) and
//! how many must be present. VibeFID cards are wildcards: each one fills a
//! missing slot.

use serde::{Deserialize, Serialize};

/// How a combo rewards its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Flat power.
    Power,
    /// Percent of the member's intrinsic power.
    PowerPercent,
    /// Drains power from every enemy card in the lane.
    Steal,
}

/// Who receives a combo bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusTarget {
    /// Each matched member.
    Members,
    /// Matched members in full, everyone else in the lane a share.
    Lane,
    /// Matched members, counted in every lane they sit in.
    AllLanes,
    /// The opposing cards in the lane.
    EnemyLane,
}

/// A combo's reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComboBonus {
    pub kind: BonusKind,
    pub value: u32,
    pub target: BonusTarget,
}

/// A combo definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub id: String,
    pub name: String,
    /// Member names, lowercase and alias-resolved.
    pub members: Vec<String>,
    /// Members needed; `None` means all of them.
    pub min_cards: Option<usize>,
    pub bonus: ComboBonus,
}

impl Combo {
    /// Create a combo requiring every member.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        members: &[&str],
        bonus: ComboBonus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: members.iter().map(|m| m.to_lowercase()).collect(),
            min_cards: None,
            bonus,
        }
    }

    /// Require only `min` of the members.
    #[must_use]
    pub fn with_min_cards(mut self, min: usize) -> Self {
        self.min_cards = Some(min);
        self
    }

    /// Members needed for the combo to fire.
    #[must_use]
    pub fn required(&self) -> usize {
        self.min_cards.unwrap_or(self.members.len())
    }

    /// Check the combo against a set of resolved names plus wildcards.
    ///
    /// Returns the match if present names and wildcards together meet
    /// the requirement.
    #[must_use]
    pub fn evaluate<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str> + Clone,
        wildcards: usize,
    ) -> Option<ComboMatch> {
        let matched: Vec<String> = self
            .members
            .iter()
            .filter(|member| names.clone().into_iter().any(|n| n == member.as_str()))
            .cloned()
            .collect();

        let missing = self.required().saturating_sub(matched.len());
        if missing > wildcards {
            return None;
        }

        Some(ComboMatch {
            combo_id: self.id.clone(),
            bonus: self.bonus,
            matched,
            wildcards_used: missing,
        })
    }
}

/// A satisfied combo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboMatch {
    pub combo_id: String,
    pub bonus: ComboBonus,
    /// Member names actually present (wildcards not included).
    pub matched: Vec<String>,
    pub wildcards_used: usize,
}

impl ComboMatch {
    /// Whether a resolved card name is one of the matched members.
    #[must_use]
    pub fn includes(&self, resolved_name: &str) -> bool {
        self.matched.iter().any(|m| m == resolved_name)
    }
}
