//! Game configuration.
//!
//! `GameConfig` is the only input the orchestrator needs besides its
//! provider and sink. It is serde-serialisable so a host can load it from
//! JSON, and offers `with_*` builder methods for programmatic use.
//!
//! ```
//! use std::time::Duration;
//! use werewolf_engine::core::GameConfig;
//!
//! let config = GameConfig::new(8)
//!     .with_max_rounds(5)
//!     .with_decision_timeout(Duration::from_secs(10))
//!     .with_seed(7);
//!
//! assert!(config.validate().is_ok());
//! assert!(GameConfig::new(0).validate().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::GameError;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Round cap. The game ends with no resolution after this many rounds.
    pub max_rounds: u32,

    /// Statement rounds the werewolves get before voting on a kill.
    /// 0 skips the private discussion.
    pub werewolf_discussion_rounds: u32,

    /// Per-request timeout. A request that does not finish in time counts
    /// as an absent decision.
    pub decision_timeout: Duration,

    /// Seed for role dealing, persona assignment and random fallbacks.
    pub seed: u64,

    /// Explicit player names in seat order. Built-in personas are used
    /// when `None`.
    pub player_names: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 6,
            max_rounds: 10,
            werewolf_discussion_rounds: 3,
            decision_timeout: Duration::from_secs(60),
            seed: 42,
            player_names: None,
        }
    }
}

impl GameConfig {
    /// Default configuration for `player_count` players.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the number of werewolf discussion rounds per night.
    #[must_use]
    pub fn with_werewolf_discussion_rounds(mut self, rounds: u32) -> Self {
        self.werewolf_discussion_rounds = rounds;
        self
    }

    /// Set the per-request decision timeout.
    #[must_use]
    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use explicit player names. Also sets `player_count`.
    #[must_use]
    pub fn with_player_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.player_count = names.len();
        self.player_names = Some(names);
        self
    }

    /// Check every parameter. Violations are configuration errors.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_count < 1 {
            return Err(GameError::configuration("player count must be at least 1"));
        }
        if self.player_count > 255 {
            return Err(GameError::configuration("at most 255 players are supported"));
        }
        if self.max_rounds < 1 {
            return Err(GameError::configuration("max_rounds must be at least 1"));
        }
        if self.decision_timeout.is_zero() {
            return Err(GameError::configuration("decision_timeout must be positive"));
        }

        if let Some(names) = &self.player_names {
            if names.len() != self.player_count {
                return Err(GameError::configuration(format!(
                    "{} player names given for {} players",
                    names.len(),
                    self.player_count
                )));
            }
            let mut seen = std::collections::BTreeSet::new();
            for name in names {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(GameError::configuration("player names must not be empty"));
                }
                if !seen.insert(trimmed) {
                    return Err(GameError::configuration(format!(
                        "duplicate player name {trimmed:?}"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 6);
        assert_eq!(config.max_rounds, 10);
        assert_eq!(config.werewolf_discussion_rounds, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_players_and_rounds() {
        assert!(GameConfig::new(0).validate().is_err());
        assert!(GameConfig::new(6).with_max_rounds(0).validate().is_err());
        assert!(GameConfig::new(6)
            .with_decision_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_player_names() {
        let config = GameConfig::default().with_player_names(["A", "B", "C"]);
        assert_eq!(config.player_count, 3);
        assert!(config.validate().is_ok());

        let dup = GameConfig::default().with_player_names(["A", "B", " A"]);
        assert!(matches!(dup.validate(), Err(GameError::Configuration(_))));

        let blank = GameConfig::default().with_player_names(["A", "  "]);
        assert!(blank.validate().is_err());

        let mut mismatched = GameConfig::default().with_player_names(["A", "B"]);
        mismatched.player_count = 3;
        assert!(mismatched.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"player_count": 9, "seed": 3}"#).unwrap();
        assert_eq!(config.player_count, 9);
        assert_eq!(config.seed, 3);
        assert_eq!(config.max_rounds, 10);
    }
}
