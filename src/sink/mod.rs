//! Event sinks: where announcements and roster changes go.
//!
//! The orchestrator publishes every transcript entry and every roster change
//! to one `EventSink`. A sink failure is logged and the game carries on;
//! delivery is best-effort and never affects game state.
//!
//! ## Provided Sinks
//!
//! - `NullSink`: Drops everything
//! - `TracingSink`: Writes events to the `tracing` log
//! - `ChannelSink`: Forwards events over an unbounded tokio channel, for
//!   hosts that stream the game to a UI

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::{Roster, SinkError};
use crate::moderator::Announcement;
use crate::roles::Role;
use crate::rules::GameResult;

/// Alive or dead, as shown on a roster board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeStatus {
    Alive,
    Dead,
}

/// One row of a roster update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    pub name: String,
    pub role: Role,
    pub status: LifeStatus,
}

/// Something a host may want to show.
///
/// Serialises with a `type` tag:
///
/// ```
/// use werewolf_engine::moderator::{Announcement, Audience, Channel};
/// use werewolf_engine::sink::GameEvent;
///
/// let event = GameEvent::Message(Announcement::statement(
///     "Moderator",
///     "Night 1 falls.",
///     Channel::Night,
///     Audience::Everyone,
/// ));
/// let json = serde_json::to_value(&event).unwrap();
/// assert_eq!(json["type"], "msg");
/// assert_eq!(json["body"], "Night 1 falls.");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A transcript entry, public or private.
    #[serde(rename = "msg")]
    Message(Announcement),

    /// Current status of every seat.
    PlayerUpdate { players: Vec<PlayerStatus> },

    /// The game has ended.
    GameOver { result: GameResult, rounds_played: u32 },
}

impl GameEvent {
    /// Snapshot the roster for a `player_update` event.
    #[must_use]
    pub fn roster(roster: &Roster) -> Self {
        let players = roster
            .iter()
            .map(|p| PlayerStatus {
                name: p.name.clone(),
                role: p.role,
                status: if p.alive { LifeStatus::Alive } else { LifeStatus::Dead },
            })
            .collect();
        GameEvent::PlayerUpdate { players }
    }
}

/// Destination for game events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: &GameEvent) -> Result<(), SinkError>;
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn publish(&self, _event: &GameEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that logs public events at `info` and private ones at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn publish(&self, event: &GameEvent) -> Result<(), SinkError> {
        match event {
            GameEvent::Message(a) if a.audience.is_public() => {
                info!(target: "werewolf::transcript", "{a}");
            }
            GameEvent::Message(a) => {
                tracing::debug!(target: "werewolf::transcript", audience = ?a.audience, "{a}");
            }
            GameEvent::PlayerUpdate { players } => {
                let alive = players.iter().filter(|p| p.status == LifeStatus::Alive).count();
                tracing::debug!(target: "werewolf::transcript", alive, total = players.len(), "Roster updated");
            }
            GameEvent::GameOver { result, rounds_played } => {
                info!(target: "werewolf::transcript", rounds_played, "{result}");
            }
        }
        Ok(())
    }
}

/// Sink forwarding events over an unbounded channel.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver its events arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn publish(&self, event: &GameEvent) -> Result<(), SinkError> {
        self.tx.send(event.clone()).map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Team;

    fn roster() -> Roster {
        Roster::new(vec![
            ("Cao Cao".into(), Role::Werewolf, String::new()),
            ("Liu Bei".into(), Role::Seer, String::new()),
        ])
    }

    #[test]
    fn test_player_update_json() {
        let mut roster = roster();
        let liu = roster.find("Liu Bei").unwrap();
        roster.kill(liu);

        let json = serde_json::to_value(GameEvent::roster(&roster)).unwrap();
        assert_eq!(json["type"], "player_update");
        assert_eq!(json["players"][0]["name"], "Cao Cao");
        assert_eq!(json["players"][0]["status"], "alive");
        assert_eq!(json["players"][1]["role"], "Seer");
        assert_eq!(json["players"][1]["status"], "dead");
    }

    #[test]
    fn test_game_over_json() {
        let event = GameEvent::GameOver {
            result: GameResult::Winner(Team::Good),
            rounds_played: 3,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "game_over");
        assert_eq!(json["rounds_played"], 3);
    }

    #[tokio::test]
    async fn test_channel_sink_delivers_then_reports_closed() {
        let (sink, mut rx) = ChannelSink::new();
        let event = GameEvent::roster(&roster());

        sink.publish(&event).await.unwrap();
        assert_eq!(rx.recv().await, Some(event.clone()));

        drop(rx);
        assert_eq!(sink.publish(&event).await, Err(SinkError::Closed));
    }
}
