//! Player identification and the seat-ordered roster.
//!
//! ## PlayerId
//!
//! Type-safe seat index supporting 1-255 players.
//!
//! ## Roster
//!
//! Every player dealt into the game, in seat order, backed by a `Vec` for
//! O(1) access by `PlayerId` and an index for lookup by display name.
//! Dead players stay on the roster; the per-role rosters are views that
//! filter on the alive flag, so a death removes a player from all of them
//! at once.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::roles::{Role, Team};

/// Seat identifier supporting 1-255 players.
///
/// Seats are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// A participant in the game.
///
/// Only the orchestrator flips `alive`; everything else is fixed at setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Unique display name.
    pub name: String,
    pub role: Role,
    /// Persona flavour text used when briefing the decision provider.
    pub temperament: String,
    pub alive: bool,
}

impl Player {
    #[must_use]
    pub fn team(&self) -> Team {
        self.role.team()
    }
}

/// Seat-ordered list of all players with name lookup.
///
/// ## Example
///
/// ```
/// use werewolf_engine::core::{PlayerId, Roster};
/// use werewolf_engine::roles::Role;
///
/// let mut roster = Roster::new(vec![
///     ("Cao Cao".to_string(), Role::Werewolf, "cunning".to_string()),
///     ("Liu Bei".to_string(), Role::Seer, "kind".to_string()),
/// ]);
///
/// let liu = roster.find("Liu Bei").unwrap();
/// assert_eq!(roster[liu].role, Role::Seer);
///
/// roster.kill(liu);
/// assert_eq!(roster.alive().count(), 1);
/// assert!(roster.living_with_role(Role::Seer).next().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
    by_name: FxHashMap<String, PlayerId>,
}

impl Roster {
    /// Seat players in the given order, all alive.
    ///
    /// Panics on more than 255 players or duplicate names; callers validate
    /// configuration before seating.
    pub fn new(seats: Vec<(String, Role, String)>) -> Self {
        assert!(seats.len() <= 255, "At most 255 players supported");

        let mut by_name = FxHashMap::default();
        let players = seats
            .into_iter()
            .enumerate()
            .map(|(i, (name, role, temperament))| {
                let id = PlayerId(i as u8);
                let previous = by_name.insert(name.clone(), id);
                assert!(previous.is_none(), "Duplicate player name {name:?}");
                Player {
                    id,
                    name,
                    role,
                    temperament,
                    alive: true,
                }
            })
            .collect();

        Self { players, by_name }
    }

    /// Total number of seated players, dead or alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get a player by seat.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Look up a seat by display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.by_name.get(name.trim()).copied()
    }

    /// Display name of a seat.
    #[must_use]
    pub fn name(&self, id: PlayerId) -> &str {
        &self[id].name
    }

    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    /// Iterate over all players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over living players in seat order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Seats of living players in seat order.
    #[must_use]
    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.alive().map(|p| p.id).collect()
    }

    /// The living roster for one role.
    pub fn living_with_role(&self, role: Role) -> impl Iterator<Item = &Player> {
        self.alive().filter(move |p| p.role == role)
    }

    /// Living werewolves in seat order.
    pub fn living_werewolves(&self) -> impl Iterator<Item = &Player> {
        self.alive().filter(|p| p.role.is_werewolf())
    }

    /// Living players who are not werewolves, in seat order.
    pub fn living_non_werewolves(&self) -> impl Iterator<Item = &Player> {
        self.alive().filter(|p| !p.role.is_werewolf())
    }

    /// Mark a player dead. Returns `false` if they were already dead.
    pub fn kill(&mut self, id: PlayerId) -> bool {
        match self.players.get_mut(id.index()) {
            Some(player) if player.alive => {
                player.alive = false;
                true
            }
            _ => false,
        }
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Self::Output {
        &self.players[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        Roster::new(vec![
            ("Cao Cao".into(), Role::Werewolf, "cunning".into()),
            ("Sima Yi".into(), Role::Werewolf, "patient".into()),
            ("Liu Bei".into(), Role::Seer, "kind".into()),
            ("Zhang Fei".into(), Role::Villager, "loud".into()),
        ])
    }

    #[test]
    fn test_seats_in_order() {
        let roster = sample();
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cao Cao", "Sima Yi", "Liu Bei", "Zhang Fei"]);
        assert_eq!(roster[PlayerId::new(2)].role, Role::Seer);
        assert_eq!(format!("{}", PlayerId::new(2)), "Seat 2");
    }

    #[test]
    fn test_find_trims_whitespace() {
        let roster = sample();
        assert_eq!(roster.find(" Liu Bei "), Some(PlayerId::new(2)));
        assert_eq!(roster.find("Lu Bu"), None);
    }

    #[test]
    fn test_kill_removes_from_role_rosters() {
        let mut roster = sample();
        let cao = roster.find("Cao Cao").unwrap();

        assert!(roster.kill(cao));
        assert!(!roster.kill(cao));

        assert_eq!(roster.len(), 4);
        assert_eq!(roster.alive().count(), 3);
        assert_eq!(roster.living_werewolves().count(), 1);
        assert_eq!(roster.living_non_werewolves().count(), 2);
        assert!(!roster.is_alive(cao));
    }

    #[test]
    #[should_panic(expected = "Duplicate player name")]
    fn test_duplicate_names_panic() {
        let _ = Roster::new(vec![
            ("A".into(), Role::Villager, String::new()),
            ("A".into(), Role::Werewolf, String::new()),
        ]);
    }
}
