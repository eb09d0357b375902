//! Win conditions.
//!
//! Good wins when no werewolf is alive. Werewolves win when they are at
//! least as many as everyone else alive. Checked after the night's deaths
//! and after the day's deaths.

use serde::{Deserialize, Serialize};

use crate::core::Roster;
use crate::roles::{Role, Team};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A team met its win condition.
    Winner(Team),
    /// The round cap was reached with both teams still in the game.
    NoResolution,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(Team::Good) => {
                f.write_str("The Good team wins! Every werewolf has been eliminated.")
            }
            GameResult::Winner(Team::Werewolves) => {
                f.write_str("The Werewolf team wins! Werewolves now equal or outnumber the good players.")
            }
            GameResult::NoResolution => {
                f.write_str("The round limit was reached. The game ends without a winner.")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WinConditionEvaluator;

impl WinConditionEvaluator {
    /// Decide a winner from the roles of the living players.
    ///
    /// Returns `None` while the game should continue.
    pub fn evaluate<I>(alive_roles: I) -> Option<Team>
    where
        I: IntoIterator<Item = Role>,
    {
        let (werewolves, others) = alive_roles
            .into_iter()
            .fold((0usize, 0usize), |(w, o), role| {
                if role.is_werewolf() {
                    (w + 1, o)
                } else {
                    (w, o + 1)
                }
            });

        if werewolves == 0 {
            Some(Team::Good)
        } else if werewolves >= others {
            Some(Team::Werewolves)
        } else {
            None
        }
    }

    /// Evaluate the living players of a roster.
    #[must_use]
    pub fn evaluate_roster(roster: &Roster) -> Option<Team> {
        Self::evaluate(roster.alive().map(|p| p.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Role::*;

    #[test]
    fn test_no_werewolves_good_wins() {
        assert_eq!(
            WinConditionEvaluator::evaluate([Seer, Villager, Hunter]),
            Some(Team::Good)
        );
        assert_eq!(WinConditionEvaluator::evaluate([]), Some(Team::Good));
    }

    #[test]
    fn test_parity_werewolves_win() {
        assert_eq!(
            WinConditionEvaluator::evaluate([Werewolf, Werewolf, Villager, Witch]),
            Some(Team::Werewolves)
        );
        assert_eq!(
            WinConditionEvaluator::evaluate([Werewolf, Werewolf, Werewolf, Villager]),
            Some(Team::Werewolves)
        );
    }

    #[test]
    fn test_game_continues() {
        assert_eq!(
            WinConditionEvaluator::evaluate([Werewolf, Villager, Seer, Witch]),
            None
        );
    }
}
