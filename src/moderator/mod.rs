//! The moderator: produces every announcement of the game.
//!
//! Each method builds an `Announcement`, appends its body to the internal
//! log and returns it. Nothing is delivered from here; the orchestrator
//! records announcements in the transcript and hands them to its sink.

pub mod announcement;

pub use announcement::{Announcement, Audience, Channel, MODERATOR};

use crate::core::{Player, PlayerId, WitchInventory};
use crate::roles::RoleInfo;
use crate::rules::{GameResult, TallyOutcome};

/// Join names for display, or "no one" for an empty list.
pub fn format_names<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "no one".to_string();
    }
    names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

#[derive(Clone, Debug, Default)]
pub struct Moderator {
    log: Vec<String>,
}

impl Moderator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies of every announcement made so far, in order.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Public announcement.
    pub fn announce(&mut self, body: impl Into<String>, channel: Channel) -> Announcement {
        self.emit(body.into(), channel, Audience::Everyone)
    }

    /// Announcement only the given seat can see.
    pub fn whisper(&mut self, to: PlayerId, body: impl Into<String>, channel: Channel) -> Announcement {
        self.emit(body.into(), channel, Audience::only(to))
    }

    /// Night announcement for the werewolves only.
    pub fn to_werewolves(&mut self, body: impl Into<String>) -> Announcement {
        self.emit(body.into(), Channel::Night, Audience::Werewolves)
    }

    fn emit(&mut self, body: String, channel: Channel, audience: Audience) -> Announcement {
        self.log.push(body.clone());
        Announcement {
            author: MODERATOR.to_string(),
            body,
            channel,
            audience,
        }
    }

    // === Setup ===

    pub fn game_start(&mut self, names: &[&str]) -> Announcement {
        self.announce(
            format!("The werewolf game begins! Players: {}", format_names(names)),
            Channel::System,
        )
    }

    pub fn role_reveal(&mut self, player: &Player, info: &RoleInfo) -> Announcement {
        self.whisper(
            player.id,
            format!(
                "{}, you are the {} ({}). {} Win condition: {}",
                player.name,
                info.role,
                info.team(),
                info.ability,
                info.win_condition
            ),
            Channel::System,
        )
    }

    pub fn pack_revealed(&mut self, werewolves: &[&str]) -> Announcement {
        self.to_werewolves(format!("The werewolves this game are: {}.", format_names(werewolves)))
    }

    // === Night ===

    pub fn night_falls(&mut self, round: u32) -> Announcement {
        self.announce(format!("Night {round} falls. Everyone, close your eyes..."), Channel::Night)
    }

    pub fn werewolves_wake(&mut self, alive: &[&str]) -> Announcement {
        self.to_werewolves(format!(
            "Werewolves, open your eyes and agree on tonight's victim. Living players: {}",
            format_names(alive)
        ))
    }

    pub fn kill_vote_opens(&mut self) -> Announcement {
        self.to_werewolves("Werewolves, each of you now name your kill target.")
    }

    pub fn kill_chosen(&mut self, victim: &str) -> Announcement {
        self.to_werewolves(format!("The werewolves chose {victim} as tonight's victim."))
    }

    pub fn seer_wakes(&mut self) -> Announcement {
        self.announce("Seer, open your eyes and choose a player to check...", Channel::Night)
    }

    pub fn seer_result(&mut self, seer: PlayerId, target: &str, is_werewolf: bool) -> Announcement {
        let verdict = if is_werewolf { "a werewolf" } else { "good" };
        self.whisper(seer, format!("Check result: {target} is {verdict}."), Channel::Night)
    }

    pub fn witch_wakes(&mut self) -> Announcement {
        self.announce("Witch, open your eyes...", Channel::Night)
    }

    pub fn witch_briefing(
        &mut self,
        witch: PlayerId,
        victim: Option<&str>,
        inventory: WitchInventory,
    ) -> Announcement {
        let night = match victim {
            Some(name) => format!("Tonight {name} was attacked by the werewolves."),
            None => "Tonight nobody was attacked.".to_string(),
        };
        let potion = |available: bool| if available { "available" } else { "used" };
        self.whisper(
            witch,
            format!(
                "{night} Antidote: {}. Poison: {}.",
                potion(inventory.antidote),
                potion(inventory.poison)
            ),
            Channel::Night,
        )
    }

    pub fn antidote_used(&mut self, witch: PlayerId, saved: &str) -> Announcement {
        self.whisper(witch, format!("You used the antidote to save {saved}."), Channel::Night)
    }

    pub fn poison_used(&mut self, witch: PlayerId, poisoned: &str) -> Announcement {
        self.whisper(witch, format!("You used the poison on {poisoned}."), Channel::Night)
    }

    pub fn deaths(&mut self, dead: &[&str]) -> Announcement {
        let body = if dead.is_empty() {
            "The night passed peacefully. No one died.".to_string()
        } else {
            format!("Last night, {} died.", format_names(dead))
        };
        self.announce(body, Channel::Day)
    }

    // === Day ===

    pub fn day_breaks(&mut self, round: u32) -> Announcement {
        self.announce(format!("Day {round} breaks. Everyone, open your eyes..."), Channel::Day)
    }

    pub fn discussion_opens(&mut self, alive: &[&str]) -> Announcement {
        self.announce(
            format!("Open discussion begins. Living players: {}", format_names(alive)),
            Channel::Day,
        )
    }

    pub fn vote_opens(&mut self) -> Announcement {
        self.announce("Vote now for the player to exile.", Channel::Day)
    }

    pub fn vote_result(&mut self, outcome: &TallyOutcome<String>) -> Announcement {
        let body = match &outcome.winner {
            None => "No valid votes were cast. No one is exiled.".to_string(),
            Some(name) if outcome.tied => format!(
                "Vote result: tie at {} votes; {name} is exiled by the tie-break.",
                outcome.count
            ),
            Some(name) => format!("Vote result: {name} is exiled with {} votes.", outcome.count),
        };
        self.announce(body, Channel::Day)
    }

    pub fn hunter_triggered(&mut self, hunter: &str) -> Announcement {
        self.announce(
            format!("{hunter} was the Hunter and may fire one last shot..."),
            Channel::Day,
        )
    }

    pub fn hunter_shot(&mut self, hunter: &str, target: &str) -> Announcement {
        self.announce(format!("Hunter {hunter} shot {target}."), Channel::Day)
    }

    pub fn game_over(&mut self, result: &GameResult) -> Announcement {
        self.announce(format!("Game over! {result}"), Channel::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Team;

    #[test]
    fn test_every_announcement_is_logged() {
        let mut moderator = Moderator::new();
        moderator.night_falls(1);
        moderator.deaths(&[]);
        moderator.deaths(&["Cao Cao", "Liu Bei"]);

        assert_eq!(
            moderator.log(),
            [
                "Night 1 falls. Everyone, close your eyes...",
                "The night passed peacefully. No one died.",
                "Last night, Cao Cao, Liu Bei died.",
            ]
        );
    }

    #[test]
    fn test_private_announcements() {
        let mut moderator = Moderator::new();
        let seer = PlayerId::new(3);

        let msg = moderator.seer_result(seer, "Sima Yi", true);
        assert_eq!(msg.body, "Check result: Sima Yi is a werewolf.");
        assert_eq!(msg.audience, Audience::only(seer));
        assert_eq!(msg.author, MODERATOR);

        let msg = moderator.seer_result(seer, "Liu Bei", false);
        assert_eq!(msg.body, "Check result: Liu Bei is good.");
    }

    #[test]
    fn test_vote_result_wording() {
        let mut moderator = Moderator::new();

        let empty = moderator.vote_result(&TallyOutcome::empty());
        assert!(empty.body.contains("No one is exiled"));

        let tie = moderator.vote_result(&TallyOutcome {
            winner: Some("Zhang Fei".to_string()),
            count: 2,
            tied: true,
        });
        assert!(tie.body.contains("tie"));

        let clear = moderator.vote_result(&TallyOutcome {
            winner: Some("Zhang Fei".to_string()),
            count: 3,
            tied: false,
        });
        assert_eq!(clear.body, "Vote result: Zhang Fei is exiled with 3 votes.");
    }

    #[test]
    fn test_game_over() {
        let mut moderator = Moderator::new();
        let msg = moderator.game_over(&GameResult::Winner(Team::Good));
        assert!(msg.body.starts_with("Game over! The Good team wins"));
        assert_eq!(msg.channel, Channel::System);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(format_names::<&str>(&[]), "no one");
        assert_eq!(format_names(&["A", "B"]), "A, B");
    }
}
