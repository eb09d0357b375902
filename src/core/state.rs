//! Game state owned by the orchestrator.
//!
//! ## GameState
//!
//! - Round counter (starts at 1) and current phase
//! - Roster of every player with alive flags; per-role rosters are views
//! - Witch potion inventory, consumed at most once per game each
//! - Scratch data for the round in progress (night actions, exile)
//! - Transcript of every announcement and statement
//!
//! The state is mutated only between phases, never while decision requests
//! are in flight.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;
use super::phase::Phase;
use super::player::{Player, PlayerId, Roster};
use crate::moderator::Announcement;
use crate::roles::Role;
use crate::rules::{GameResult, NightResolution};

/// The witch's potions. Each can be used once per game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitchInventory {
    pub antidote: bool,
    pub poison: bool,
}

impl Default for WitchInventory {
    fn default() -> Self {
        Self {
            antidote: true,
            poison: true,
        }
    }
}

impl WitchInventory {
    /// Consume the antidote. Returns `false` if it was already used.
    pub fn take_antidote(&mut self) -> bool {
        std::mem::replace(&mut self.antidote, false)
    }

    /// Consume the poison. Returns `false` if it was already used.
    pub fn take_poison(&mut self) -> bool {
        std::mem::replace(&mut self.poison, false)
    }
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Round number (starts at 1).
    pub round: u32,

    /// Phase currently running or about to run.
    pub phase: Phase,

    /// Every player, alive or dead, in seat order.
    pub roster: Roster,

    /// Witch potion inventory.
    pub witch: WitchInventory,

    /// Night actions collected so far this round.
    pub night: NightResolution,

    /// Player exiled by today's vote.
    pub exiled: Option<PlayerId>,

    /// Final result once terminated.
    pub result: Option<GameResult>,

    /// Every announcement and statement, in order.
    transcript: Vector<Announcement>,
}

impl GameState {
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            round: 1,
            phase: Phase::Setup,
            roster,
            witch: WitchInventory::default(),
            night: NightResolution::default(),
            exiled: None,
            result: None,
            transcript: Vector::new(),
        }
    }

    // === Roster views ===

    /// Names of living players in seat order.
    #[must_use]
    pub fn living_names(&self) -> Vec<&str> {
        self.roster.alive().map(|p| p.name.as_str()).collect()
    }

    /// The single living holder of a role, if any.
    #[must_use]
    pub fn living_singleton(&self, role: Role) -> Option<&Player> {
        self.roster.living_with_role(role).next()
    }

    /// Mark players dead. Returns the ones that were alive until now.
    pub fn apply_deaths(&mut self, dead: &[PlayerId]) -> SmallVec<[PlayerId; 2]> {
        dead.iter()
            .copied()
            .filter(|&id| self.roster.kill(id))
            .collect()
    }

    // === Round progression ===

    /// Start the next round, clearing the per-round scratch data.
    pub fn advance_round(&mut self) {
        self.round += 1;
        self.night = NightResolution::default();
        self.exiled = None;
    }

    // === Transcript ===

    pub fn record(&mut self, announcement: Announcement) {
        self.transcript.push_back(announcement);
    }

    /// Full transcript. Cloning is O(1).
    #[must_use]
    pub fn transcript(&self) -> &Vector<Announcement> {
        &self.transcript
    }

    /// The part of the transcript a player may see.
    #[must_use]
    pub fn visible_transcript(&self, player: &Player) -> Vector<Announcement> {
        self.transcript
            .iter()
            .filter(|a| a.visible_to(player))
            .cloned()
            .collect()
    }

    // === Invariants ===

    /// Verify roster consistency. A failure here ends the game run.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let alive = self.roster.alive().count();
        if alive > self.roster.len() {
            return Err(GameError::invariant(format!(
                "{alive} living players on a roster of {}",
                self.roster.len()
            )));
        }

        for role in Role::ALL.into_iter().filter(|r| r.is_singleton()) {
            let living = self.roster.living_with_role(role).count();
            if living > 1 {
                return Err(GameError::invariant(format!(
                    "{living} living players hold the {role} role"
                )));
            }
        }

        if self.round == 0 {
            return Err(GameError::invariant("round counter must start at 1"));
        }

        if let Some(exiled) = self.exiled.filter(|&id| self.roster.is_alive(id)) {
            return Err(GameError::invariant(format!(
                "exiled player {} is still alive",
                self.roster.name(exiled)
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderator::{Audience, Channel};

    fn six_players() -> GameState {
        GameState::new(Roster::new(vec![
            ("W1".into(), Role::Werewolf, String::new()),
            ("W2".into(), Role::Werewolf, String::new()),
            ("Seer".into(), Role::Seer, String::new()),
            ("Witch".into(), Role::Witch, String::new()),
            ("V1".into(), Role::Villager, String::new()),
            ("V2".into(), Role::Villager, String::new()),
        ]))
    }

    #[test]
    fn test_new_state() {
        let state = six_players();
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.witch, WitchInventory { antidote: true, poison: true });
        assert_eq!(state.living_names().len(), 6);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_potions_are_single_use() {
        let mut inventory = WitchInventory::default();
        assert!(inventory.take_antidote());
        assert!(!inventory.take_antidote());
        assert!(!inventory.antidote);
        assert!(inventory.poison);
        assert!(inventory.take_poison());
        assert!(!inventory.take_poison());
    }

    #[test]
    fn test_apply_deaths_reports_new_deaths_only() {
        let mut state = six_players();
        let seer = state.roster.find("Seer").unwrap();
        let v1 = state.roster.find("V1").unwrap();

        let dead = state.apply_deaths(&[seer, v1]);
        assert_eq!(dead.as_slice(), &[seer, v1]);

        let again = state.apply_deaths(&[seer]);
        assert!(again.is_empty());
        assert!(state.living_singleton(Role::Seer).is_none());
        assert_eq!(state.living_names(), ["W1", "W2", "Witch", "V2"]);
    }

    #[test]
    fn test_exiled_player_must_be_dead() {
        let mut state = six_players();
        let v2 = state.roster.find("V2").unwrap();
        state.exiled = Some(v2);
        assert!(matches!(state.check_invariants(), Err(GameError::Invariant(_))));

        state.apply_deaths(&[v2]);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_advance_round_clears_scratch() {
        let mut state = six_players();
        state.night.killed = Some(PlayerId::new(4));
        state.exiled = Some(PlayerId::new(0));
        state.witch.take_antidote();

        state.advance_round();

        assert_eq!(state.round, 2);
        assert_eq!(state.night, NightResolution::default());
        assert_eq!(state.exiled, None);
        assert!(!state.witch.antidote, "potions persist across rounds");
    }

    #[test]
    fn test_visible_transcript_filters_private_messages() {
        let mut state = six_players();
        let seer_id = state.roster.find("Seer").unwrap();
        state.record(Announcement::statement("Moderator", "public", Channel::Day, Audience::Everyone));
        state.record(Announcement::statement("W1", "wolves only", Channel::Night, Audience::Werewolves));
        state.record(Announcement::statement("Moderator", "seer only", Channel::Night, Audience::only(seer_id)));

        let wolf = state.roster[PlayerId::new(0)].clone();
        let seer = state.roster[seer_id].clone();
        let villager = state.roster[PlayerId::new(4)].clone();

        assert_eq!(state.visible_transcript(&wolf).len(), 2);
        assert_eq!(state.visible_transcript(&seer).len(), 2);
        assert_eq!(state.visible_transcript(&villager).len(), 1);
        assert_eq!(state.transcript().len(), 3);
    }

    #[test]
    fn test_invariant_rejects_duplicate_singletons() {
        let state = GameState::new(Roster::new(vec![
            ("A".into(), Role::Seer, String::new()),
            ("B".into(), Role::Seer, String::new()),
        ]));
        assert!(matches!(state.check_invariants(), Err(GameError::Invariant(_))));
    }
}
