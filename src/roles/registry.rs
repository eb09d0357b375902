//! Role registry: the static role catalog and setup generation.
//!
//! The catalog is read-only data shared by reference. `standard_setup`
//! returns the curated mixes for 6, 8 and 9 players and a generated mix for
//! every other count.
//!
//! The generator never deals a Guardian. The role exists in the catalog and
//! in the curated 9-player mix only; this asymmetry is kept on purpose.

use super::definition::{Role, RoleInfo};
use crate::core::GameError;

static CATALOG: [RoleInfo; 6] = [
    RoleInfo {
        role: Role::Werewolf,
        ability_name: "Night Kill",
        ability: "Each night, choose one player to kill together with the other werewolves.",
        win_condition: "Eliminate the good players until werewolves equal or outnumber them.",
    },
    RoleInfo {
        role: Role::Seer,
        ability_name: "Divination",
        ability: "Each night, check one player to learn whether they are a werewolf.",
        win_condition: "Eliminate every werewolf.",
    },
    RoleInfo {
        role: Role::Witch,
        ability_name: "Potions",
        ability: "Holds one antidote and one poison: save the night's victim or poison a player.",
        win_condition: "Eliminate every werewolf.",
    },
    RoleInfo {
        role: Role::Hunter,
        ability_name: "Last Shot",
        ability: "When exiled by vote, may shoot one player and take them along.",
        win_condition: "Eliminate every werewolf.",
    },
    RoleInfo {
        role: Role::Guardian,
        ability_name: "Protection",
        ability: "Each night, may guard one player against the werewolves' attack.",
        win_condition: "Eliminate every werewolf.",
    },
    RoleInfo {
        role: Role::Villager,
        ability_name: "Deduction",
        ability: "No special ability; relies on reasoning and the vote.",
        win_condition: "Eliminate every werewolf.",
    },
];

/// A character a player can be given: display name plus speaking style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub temperament: &'static str,
}

static PERSONAS: [Persona; 9] = [
    Persona { name: "Liu Bei", temperament: "benevolent and tolerant, unites people, speaks gently and courteously" },
    Persona { name: "Guan Yu", temperament: "loyal and fierce, blunt in speech, values honour above all" },
    Persona { name: "Zhang Fei", temperament: "bold and forthright, loud and direct, quick to anger" },
    Persona { name: "Zhuge Liang", temperament: "brilliant strategist, thorough in analysis, careful with words" },
    Persona { name: "Zhao Yun", temperament: "brave and steadfast, speaks briefly and forcefully" },
    Persona { name: "Cao Cao", temperament: "ambitious schemer, sharp-tongued and calculating" },
    Persona { name: "Sima Yi", temperament: "patient and deep, reveals little, speaks in implications" },
    Persona { name: "Zhou Yu", temperament: "gifted and slightly proud, precise in analysis" },
    Persona { name: "Sun Quan", temperament: "young and decisive, speaks with resolve" },
];

/// Temperament given to players beyond the persona catalog.
pub const DEFAULT_TEMPERAMENT: &str = "even-tempered, speaks plainly and politely";

/// Static role catalog and setup generator.
///
/// ## Example
///
/// ```
/// use werewolf_engine::roles::{Role, RoleRegistry};
///
/// let roles = RoleRegistry::standard_setup(6).unwrap();
/// assert_eq!(roles.iter().filter(|r| **r == Role::Werewolf).count(), 2);
///
/// let info = RoleRegistry::info(Role::Witch);
/// assert_eq!(info.ability_name, "Potions");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleRegistry;

impl RoleRegistry {
    /// Catalog entry for a role.
    #[must_use]
    pub fn info(role: Role) -> &'static RoleInfo {
        // CATALOG is declared in `Role` discriminant order
        &CATALOG[role as usize]
    }

    /// Iterate over every catalog entry.
    pub fn iter() -> impl Iterator<Item = &'static RoleInfo> {
        CATALOG.iter()
    }

    /// Built-in personas, in catalog order.
    #[must_use]
    pub fn personas() -> &'static [Persona] {
        &PERSONAS
    }

    /// Role mix for `player_count` players, werewolves first.
    ///
    /// Curated mixes for 6, 8 and 9 players; otherwise `max(1, n / 3)`
    /// werewolves, then one Seer, Witch and Hunter while slots remain, then
    /// Villagers.
    pub fn standard_setup(player_count: usize) -> Result<Vec<Role>, GameError> {
        use Role::*;

        if player_count < 1 {
            return Err(GameError::configuration(
                "player count must be at least 1",
            ));
        }

        let roles = match player_count {
            6 => vec![Werewolf, Werewolf, Seer, Witch, Villager, Villager],
            8 => vec![Werewolf, Werewolf, Werewolf, Seer, Witch, Hunter, Villager, Villager],
            9 => vec![
                Werewolf, Werewolf, Werewolf, Seer, Witch, Hunter, Guardian, Villager, Villager,
            ],
            n => Self::generated_setup(n),
        };

        Ok(roles)
    }

    fn generated_setup(player_count: usize) -> Vec<Role> {
        let werewolves = (player_count / 3).max(1).min(player_count);
        let mut roles = vec![Role::Werewolf; werewolves];

        let mut remaining = player_count - werewolves;
        for special in [Role::Seer, Role::Witch, Role::Hunter] {
            if remaining == 0 {
                break;
            }
            roles.push(special);
            remaining -= 1;
        }

        roles.extend(std::iter::repeat(Role::Villager).take(remaining));
        roles
    }
}
