//! Shared fixtures for integration tests.
//!
//! - `ScriptedProvider`: answers from a closure and records every request
//! - `RecordingSink` / `FailingSink`: capture or reject published events
//! - `init_logging`: one-time tracing setup honouring `TEST_LOG`

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use werewolf_engine::core::{GameConfig, Player, ProviderError, SinkError};
use werewolf_engine::provider::{DecisionProvider, PhaseContext, RequestKind};
use werewolf_engine::roles::Role;
use werewolf_engine::sink::{EventSink, GameEvent};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialise tracing once. Level from `TEST_LOG`, then `RUST_LOG`, else `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

// === Fixtures ===

pub const SIX_NAMES: [&str; 6] = ["Wolf A", "Wolf B", "Seer", "Witch", "Villager A", "Villager B"];
pub const SIX_ROLES: [Role; 6] = [
    Role::Werewolf,
    Role::Werewolf,
    Role::Seer,
    Role::Witch,
    Role::Villager,
    Role::Villager,
];

/// Six named players, no werewolf discussion.
pub fn six_player_config() -> GameConfig {
    GameConfig::default()
        .with_player_names(SIX_NAMES)
        .with_werewolf_discussion_rounds(0)
}

// === Provider ===

/// What a scripted player does with a request.
pub enum Reply {
    Say(String),
    Fail(ProviderError),
    Hang,
    Panic,
}

impl Reply {
    pub fn say(text: impl Into<String>) -> Self {
        Reply::Say(text.into())
    }

    pub fn silent() -> Self {
        Reply::Say(String::new())
    }

    /// A single-field JSON answer.
    pub fn json(key: &str, value: &str) -> Self {
        let mut object = serde_json::Map::new();
        object.insert(key.to_string(), serde_json::Value::from(value));
        Reply::Say(serde_json::Value::Object(object).to_string())
    }
}

/// A request as the provider saw it.
#[derive(Clone, Debug)]
pub struct Request {
    pub round: u32,
    pub player: String,
    pub kind: RequestKind,
    pub candidates: Vec<String>,
    pub transcript: Vec<String>,
}

type Script = Box<dyn Fn(&Player, &PhaseContext) -> Reply + Send + Sync>;

pub struct ScriptedProvider {
    script: Script,
    ready: Result<(), ProviderError>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedProvider {
    pub fn new(script: impl Fn(&Player, &PhaseContext) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            ready: Ok(()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every player stays silent.
    pub fn silent() -> Self {
        Self::new(|_, _| Reply::silent())
    }

    pub fn with_ready(mut self, ready: Result<(), ProviderError>) -> Self {
        self.ready = ready;
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_of(&self, kind: RequestKind) -> Vec<Request> {
        self.requests().into_iter().filter(|r| r.kind == kind).collect()
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn request_decision(
        &self,
        player: &Player,
        context: &PhaseContext,
    ) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(Request {
            round: context.round,
            player: player.name.clone(),
            kind: context.kind,
            candidates: context.candidates.clone(),
            transcript: context.transcript.iter().map(|a| a.body.clone()).collect(),
        });

        match (self.script)(player, context) {
            Reply::Say(text) => Ok(text),
            Reply::Fail(err) => Err(err),
            Reply::Hang => std::future::pending().await,
            Reply::Panic => panic!("scripted provider panic"),
        }
    }

    fn ensure_ready(&self) -> Result<(), ProviderError> {
        self.ready.clone()
    }
}

/// First candidate whose name starts with `prefix`.
pub fn first_matching(context: &PhaseContext, prefix: &str) -> Option<String> {
    context
        .candidates
        .iter()
        .find(|c| c.starts_with(prefix))
        .cloned()
}

// === Sinks ===

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Bodies of published messages.
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Message(a) => Some(a.body),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, event: &GameEvent) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn publish(&self, _event: &GameEvent) -> Result<(), SinkError> {
        Err(SinkError::Failed("transport down".into()))
    }
}
