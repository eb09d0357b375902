//! Night resolution.
//!
//! A player is alive at dawn iff they are not in
//! `(killed - saved) ∪ {poisoned}`. The antidote only cancels the
//! werewolves' kill; a poison on the same player still lands.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Everything that happened to players during one night.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightResolution {
    /// Werewolves' chosen victim.
    pub killed: Option<PlayerId>,
    /// Player saved by the witch's antidote.
    pub saved: Option<PlayerId>,
    /// Player poisoned by the witch.
    pub poisoned: Option<PlayerId>,
}

impl NightResolution {
    #[must_use]
    pub fn new(killed: Option<PlayerId>, saved: Option<PlayerId>, poisoned: Option<PlayerId>) -> Self {
        Self {
            killed,
            saved,
            poisoned,
        }
    }

    /// Players who die overnight, kill first, without duplicates.
    #[must_use]
    pub fn deaths(&self) -> SmallVec<[PlayerId; 2]> {
        let mut deaths = SmallVec::new();

        if let Some(victim) = self.killed {
            if self.saved != Some(victim) {
                deaths.push(victim);
            }
        }
        if let Some(victim) = self.poisoned {
            if !deaths.contains(&victim) {
                deaths.push(victim);
            }
        }

        deaths
    }
}
