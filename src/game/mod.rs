//! The game itself: orchestrator and the text handed to providers.
//!
//! ## Key Types
//!
//! - `GameOrchestrator`: Owns the state and runs the phase loop
//! - `GameOutcome`: Result, survivors and full transcript of a finished game

mod orchestrator;
pub mod prompts;

pub use orchestrator::{GameOrchestrator, GameOutcome};
