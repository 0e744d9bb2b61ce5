//! Full-match driver.
//!
//! Runs a battle from deal to resolution between two policies. All
//! randomness derives from one seed through named streams, so the same
//! seed, decks and policies always produce the same record.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::{Strategy, TurnPolicy, TurnReport};
use crate::battle::{Battle, BattleLog, BattleOutcome};
use crate::cards::{Card, CardCatalog};
use crate::core::{BattleConfig, EngineResult, GameRng, Side};

/// One side's turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub side: Side,
    pub report: TurnReport,
}

/// Result of a simulated match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub outcome: BattleOutcome,
    pub log: BattleLog,
    pub turns: Vec<TurnRecord>,
}

impl MatchRecord {
    /// Strategies a side rolled, in turn order.
    #[must_use]
    pub fn strategies(&self, side: Side) -> Vec<Strategy> {
        self.turns
            .iter()
            .filter(|t| t.side == side)
            .filter_map(|t| t.report.strategy)
            .collect()
    }
}

/// Play a whole match.
///
/// The player acts before the CPU each turn; both commit face-down, so
/// neither sees the other's plays for the turn.
pub fn run_match<C, P, Q>(
    catalog: C,
    config: BattleConfig,
    player_deck: Vec<Card>,
    cpu_deck: Vec<Card>,
    mut player: P,
    mut cpu: Q,
    seed: u64,
) -> EngineResult<MatchRecord>
where
    C: CardCatalog,
    P: TurnPolicy,
    Q: TurnPolicy,
{
    let root = GameRng::new(seed);
    let mut battle = Battle::setup(catalog, config, player_deck, cpu_deck, &root)?;
    let mut rngs = [root.for_context("policy-player"), root.for_context("policy-cpu")];
    let mut turns = Vec::new();

    let outcome = loop {
        let turn = battle.turn();

        let report = player.take_turn(&mut battle, Side::Player, &mut rngs[Side::Player.index()])?;
        turns.push(TurnRecord {
            turn,
            side: Side::Player,
            report,
        });

        let report = cpu.take_turn(&mut battle, Side::Cpu, &mut rngs[Side::Cpu.index()])?;
        turns.push(TurnRecord {
            turn,
            side: Side::Cpu,
            report,
        });

        if let Some(outcome) = battle.end_turn()? {
            break outcome;
        }
    };

    info!(seed, result = ?outcome.result, turns = outcome.turns_played, "match finished");
    Ok(MatchRecord {
        seed,
        outcome,
        log: battle.log().clone(),
        turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{CpuAi, PassPolicy};
    use crate::battle::MatchResult;
    use crate::cards::StaticCatalog;

    fn deck(prefix: &str) -> Vec<Card> {
        (0..8)
            .map(|i| Card::vbms(format!("{prefix}-v{i}").as_str(), 20 + i))
            .chain((0..4).map(|i| Card::nothing(format!("{prefix}-n{i}").as_str(), 12)))
            .collect()
    }

    #[test]
    fn test_pass_vs_pass_ties() {
        let record = run_match(
            StaticCatalog::new(),
            BattleConfig::default(),
            deck("p"),
            deck("c"),
            PassPolicy,
            PassPolicy,
            1,
        )
        .unwrap();

        assert_eq!(record.outcome.result, MatchResult::Tie);
        assert_eq!(record.outcome.turns_played, 6);
        assert_eq!(record.turns.len(), 12);
        assert!(record.strategies(Side::Cpu).is_empty());
    }

    #[test]
    fn test_cpu_outscores_passive_player() {
        let record = run_match(
            StaticCatalog::new(),
            BattleConfig::default(),
            deck("p"),
            deck("c"),
            PassPolicy,
            CpuAi::default(),
            2,
        )
        .unwrap();

        assert_ne!(record.outcome.winner(), Some(Side::Player));
        assert!(record.outcome.board_totals[Side::Cpu] > 0);
        assert_eq!(record.outcome.board_totals[Side::Player], 0);
        assert_eq!(record.strategies(Side::Cpu).len(), 6);
    }
}
