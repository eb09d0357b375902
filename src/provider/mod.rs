//! Decision providers: the policies that play each seat.
//!
//! The orchestrator never decides for a player. It builds a `PhaseContext`
//! describing what is being asked, hands it to a `DecisionProvider` and
//! interprets the free-text answer with the `DecisionExtractor`.
//!
//! Providers must be callable concurrently for different players; the
//! orchestrator fans requests out during simultaneous phases.

pub mod random;

pub use random::RandomProvider;

use async_trait::async_trait;
use im::Vector;
use serde::Serialize;

use crate::core::{Phase, Player, ProviderError};
use crate::moderator::Announcement;
use crate::roles::Role;

/// What a request asks the player to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Private statement to the other werewolves.
    WerewolfDiscussion,
    /// Werewolf kill vote (`KillChoice`).
    Kill,
    /// Seer check (`CheckChoice`).
    Check,
    /// Witch potions (`WitchChoice`).
    Potions,
    /// Public statement during the day.
    Discussion,
    /// Exile vote (`VoteChoice`).
    Vote,
    /// Hunter's last shot (`ShootChoice`).
    Shoot,
}

impl RequestKind {
    /// Free-text requests are taken as statements, not JSON decisions.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(self, RequestKind::WerewolfDiscussion | RequestKind::Discussion)
    }
}

/// Everything a provider sees when asked for a decision.
#[derive(Clone, Debug, Serialize)]
pub struct PhaseContext {
    pub round: u32,
    pub phase: Phase,
    pub kind: RequestKind,
    pub player: String,
    pub role: Role,
    /// Role briefing and persona, stable for the whole game.
    pub briefing: String,
    /// What to answer and in which format.
    pub instruction: String,
    /// Names the answer may refer to. Empty for free-text requests.
    pub candidates: Vec<String>,
    /// Announcements and statements visible to this player so far.
    pub transcript: Vector<Announcement>,
}

/// A policy that answers decision requests with free text.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Produce the raw response of `player` for `context`.
    async fn request_decision(
        &self,
        player: &Player,
        context: &PhaseContext,
    ) -> Result<String, ProviderError>;

    /// Check credentials and endpoints before the game starts.
    ///
    /// A failure here aborts setup with a configuration error.
    fn ensure_ready(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
