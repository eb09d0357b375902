//! Game rules: vote counting, night resolution, and win conditions.
//!
//! These are pure functions over roster data. The orchestrator calls into
//! them at phase boundaries and never re-implements the rules inline.

pub mod night;
pub mod tally;
pub mod win;

pub use night::NightResolution;
pub use tally::{TallyOutcome, VoteTally, NO_ONE};
pub use win::{GameResult, WinConditionEvaluator};
