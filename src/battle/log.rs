//! Battle log.
//!
//! An append-only record of everything that changed the board or a hand.
//! Backed by `im::Vector` so cloning a battle (for AI views or replays)
//! shares the history instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Side;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
    /// Card committed to a lane.
    Play { card_id: CardId, lane: usize, cost: u32 },
    /// Filler card converted into energy.
    Sacrifice { card_id: CardId, energy: u32 },
    /// Card moved from deck to hand.
    Draw { card_id: CardId },
    /// Energy granted outside the turn refill (on-reveal effects).
    EnergyGained { amount: u32 },
    /// On-reveal effect changed a card's power. `owner` holds the card.
    PowerShift { owner: Side, card_id: CardId, delta: i64 },
    /// On-reveal effect removed a card from the board.
    Destroyed { owner: Side, card_id: CardId, lane: usize },
    /// Skip trigger moved an opponent card to the acting side.
    Stolen { card_id: CardId, from_lane: usize, to_lane: usize },
    /// Side's energy pool refilled for a new turn.
    EnergyRefill { energy: u32, skip_bonus: bool },
    /// Turn closed.
    TurnEnd,
    /// Match resolved.
    Resolved { winner: Option<Side> },
}

/// A single log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    /// `None` for board-wide events.
    pub side: Option<Side>,
    pub action: LogAction,
}

/// Persistent battle history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vector<LogEntry>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, turn: u32, side: Option<Side>, action: LogAction) {
        self.entries.push_back(LogEntry { turn, side, action });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries for one side.
    pub fn for_side(&self, side: Side) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.side == Some(side))
    }

    /// Cards a side played on a given turn.
    #[must_use]
    pub fn plays_on_turn(&self, side: Side, turn: u32) -> Vec<&CardId> {
        self.for_side(side)
            .filter(|e| e.turn == turn)
            .filter_map(|e| match &e.action {
                LogAction::Play { card_id, .. } => Some(card_id),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_filter() {
        let mut log = BattleLog::new();
        log.record(
            1,
            Some(Side::Player),
            LogAction::Play {
                card_id: CardId::new("a"),
                lane: 0,
                cost: 2,
            },
        );
        log.record(1, Some(Side::Cpu), LogAction::Draw { card_id: CardId::new("b") });
        log.record(1, None, LogAction::TurnEnd);

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_side(Side::Cpu).count(), 1);
        assert_eq!(log.plays_on_turn(Side::Player, 1), vec![&CardId::new("a")]);
        assert!(log.plays_on_turn(Side::Player, 2).is_empty());
    }

    #[test]
    fn test_clone_shares_history() {
        let mut log = BattleLog::new();
        log.record(1, None, LogAction::TurnEnd);
        let snapshot = log.clone();
        log.record(2, None, LogAction::TurnEnd);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
