//! # werewolf-engine
//!
//! A turn-based orchestration engine for werewolf (social deduction) games
//! played by pluggable decision providers.
//!
//! ## Design Principles
//!
//! 1. **Providers Decide, the Engine Rules**: Every choice comes from a
//!    `DecisionProvider` as free text. The engine extracts a typed decision,
//!    validates it against the phase's candidates and applies the rules.
//!
//! 2. **Absent Is a Value**: Unparsable answers, provider faults and timeouts
//!    all become `Decision::Absent`. Each phase has a documented fallback;
//!    none of them aborts the game.
//!
//! 3. **Explicit Fan-Out**: Simultaneous phases issue requests concurrently
//!    and join on all of them before resolving. State is only mutated between
//!    phases.
//!
//! ## Architecture
//!
//! - **Pure Rules**: Tallying, night resolution and win conditions are plain
//!   functions in `rules`, independent of the async orchestration.
//!
//! - **Persistent Transcript**: The transcript is an `im::Vector`, so every
//!   request gets an O(1) snapshot of what its player may see.
//!
//! - **Injected Transport**: Announcements and roster changes go to an
//!   `EventSink`; delivery failures never reach the game.
//!
//! ## Modules
//!
//! - `core`: Players, roster, state, phases, RNG, configuration, errors
//! - `roles`: Roles, teams, the role catalog and standard setups
//! - `decisions`: Decision extraction from free text and typed choices
//! - `rules`: Vote tally, night resolution, win conditions
//! - `moderator`: Announcements and the moderator that produces them
//! - `provider`: The decision provider seam and a random provider
//! - `sink`: The event sink seam and stock sinks
//! - `game`: The orchestrator

pub mod core;
pub mod roles;
pub mod decisions;
pub mod rules;
pub mod moderator;
pub mod provider;
pub mod sink;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameError, GameRng, GameState, Phase, Player, PlayerId, ProviderError, Roster,
    SinkError, WitchInventory,
};

pub use crate::roles::{Role, RoleInfo, RoleRegistry, Team};

pub use crate::decisions::{Decision, DecisionExtractor};

pub use crate::rules::{GameResult, NightResolution, TallyOutcome, VoteTally, WinConditionEvaluator};

pub use crate::moderator::{Announcement, Audience, Channel, Moderator};

pub use crate::provider::{DecisionProvider, PhaseContext, RandomProvider, RequestKind};

pub use crate::sink::{ChannelSink, EventSink, GameEvent, NullSink, TracingSink};

pub use crate::game::{GameOrchestrator, GameOutcome};
