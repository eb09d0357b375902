//! Round state machine phases.
//!
//! ```text
//! Setup -> NightWerewolf -> NightSeer -> NightWitch -> NightResolve -> WinCheckNight
//!       -> DayDiscuss -> DayVote -> DayHunter -> WinCheckDay -> NightWerewolf | Terminated
//! ```
//!
//! Win checks may jump straight to `Terminated`; that decision belongs to
//! the orchestrator, `Phase::next` only encodes the fixed sequence.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    NightWerewolf,
    NightSeer,
    NightWitch,
    NightResolve,
    WinCheckNight,
    DayDiscuss,
    DayVote,
    DayHunter,
    WinCheckDay,
    Terminated,
}

impl Phase {
    /// The phase that follows this one when nobody has won.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Setup => Phase::NightWerewolf,
            Phase::NightWerewolf => Phase::NightSeer,
            Phase::NightSeer => Phase::NightWitch,
            Phase::NightWitch => Phase::NightResolve,
            Phase::NightResolve => Phase::WinCheckNight,
            Phase::WinCheckNight => Phase::DayDiscuss,
            Phase::DayDiscuss => Phase::DayVote,
            Phase::DayVote => Phase::DayHunter,
            Phase::DayHunter => Phase::WinCheckDay,
            Phase::WinCheckDay => Phase::NightWerewolf,
            Phase::Terminated => Phase::Terminated,
        }
    }

    #[must_use]
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            Phase::NightWerewolf | Phase::NightSeer | Phase::NightWitch | Phase::NightResolve
        )
    }

    /// Label used in logs and provider prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::NightWerewolf => "night-werewolf",
            Phase::NightSeer => "night-seer",
            Phase::NightWitch => "night-witch",
            Phase::NightResolve => "night-resolve",
            Phase::WinCheckNight => "win-check-night",
            Phase::DayDiscuss => "day-discuss",
            Phase::DayVote => "day-vote",
            Phase::DayHunter => "day-hunter",
            Phase::WinCheckDay => "win-check-day",
            Phase::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
