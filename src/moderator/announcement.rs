//! Announcements: the immutable messages that make up the game transcript.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerId};

/// Author of every moderator announcement.
pub const MODERATOR: &str = "Moderator";

/// Logical channel an announcement belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    System,
    Night,
    Day,
}

/// Who may see an announcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "players", rename_all = "snake_case")]
pub enum Audience {
    Everyone,
    /// Living and dead werewolves.
    Werewolves,
    /// Specific seats only.
    Players(SmallVec<[PlayerId; 2]>),
}

impl Audience {
    #[must_use]
    pub fn only(player: PlayerId) -> Self {
        Audience::Players(smallvec::smallvec![player])
    }

    #[must_use]
    pub fn includes(&self, player: &Player) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Werewolves => player.role.is_werewolf(),
            Audience::Players(ids) => ids.contains(&player.id),
        }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Audience::Everyone)
    }
}

/// One message in the game transcript.
///
/// Produced by the `Moderator` (author `"Moderator"`) or recorded on behalf
/// of a player when they speak.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub author: String,
    pub body: String,
    pub channel: Channel,
    pub audience: Audience,
}

impl Announcement {
    /// A public statement made by a player.
    #[must_use]
    pub fn statement(author: impl Into<String>, body: impl Into<String>, channel: Channel, audience: Audience) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            channel,
            audience,
        }
    }

    #[must_use]
    pub fn visible_to(&self, player: &Player) -> bool {
        self.audience.includes(player)
    }
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.author, self.body)
    }
}
