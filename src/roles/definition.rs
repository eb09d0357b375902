//! Role definitions - static role data.
//!
//! `Role` is a tagged enum carrying its team, so "is this a werewolf?" is a
//! match on a variant rather than a comparison of display strings.
//! The human-readable ability and win-condition text lives in `RoleInfo`.

use serde::{Deserialize, Serialize};

/// Winning team a role belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Wins at parity with the rest of the village.
    Werewolves,
    /// Wins when no werewolf is left alive.
    Good,
}

impl Team {
    /// Display name of the team.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Team::Werewolves => "Werewolf team",
            Team::Good => "Good team",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A role a player can be dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Werewolf,
    Seer,
    Witch,
    Hunter,
    Guardian,
    Villager,
}

impl Role {
    /// Every role in catalog order.
    pub const ALL: [Role; 6] = [
        Role::Werewolf,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
        Role::Guardian,
        Role::Villager,
    ];

    /// Team this role wins with.
    #[must_use]
    pub const fn team(self) -> Team {
        match self {
            Role::Werewolf => Team::Werewolves,
            Role::Seer | Role::Witch | Role::Hunter | Role::Guardian | Role::Villager => Team::Good,
        }
    }

    #[must_use]
    pub const fn is_werewolf(self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// Roles of which at most one is ever dealt by the standard setups.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Role::Seer | Role::Witch | Role::Hunter | Role::Guardian)
    }

    /// Display name of the role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Werewolf => "Werewolf",
            Role::Seer => "Seer",
            Role::Witch => "Witch",
            Role::Hunter => "Hunter",
            Role::Guardian => "Guardian",
            Role::Villager => "Villager",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable catalog entry describing a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    /// Name of the role's ability.
    pub ability_name: &'static str,
    /// One-line ability description.
    pub ability: &'static str,
    /// Win condition text.
    pub win_condition: &'static str,
}

impl RoleInfo {
    #[must_use]
    pub const fn team(&self) -> Team {
        self.role.team()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_werewolf_is_on_werewolf_team() {
        for role in Role::ALL {
            assert_eq!(role.is_werewolf(), role.team() == Team::Werewolves, "{role}");
        }
    }

    #[test]
    fn test_singletons() {
        assert!(Role::Seer.is_singleton());
        assert!(Role::Guardian.is_singleton());
        assert!(!Role::Werewolf.is_singleton());
        assert!(!Role::Villager.is_singleton());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Witch).unwrap();
        assert_eq!(json, "\"Witch\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Witch);
    }
}
