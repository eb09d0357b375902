//! Decisions: what a player's response means for the current phase.
//!
//! ## Key Types
//!
//! - `Decision<T>`: Either a usable decision or `Absent`
//! - `DecisionExtractor`: Recovers JSON objects from free-text responses
//! - `KillChoice`, `CheckChoice`, `WitchChoice`, `VoteChoice`, `ShootChoice`:
//!   Typed payloads per phase
//!
//! `Absent` is an ordinary outcome. Every phase defines what happens when
//! a player's decision is absent; the compiler makes each call site say so.

pub mod choice;
pub mod extract;

pub use choice::{CheckChoice, KillChoice, ShootChoice, VoteChoice, WitchChoice};
pub use extract::{DecisionExtractor, DecisionObject};

/// A player's decision for one phase, or its absence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    Made(T),
    Absent,
}

impl<T> Decision<T> {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Decision::Absent)
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Decision::Made(v) => Some(v),
            Decision::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decision<U> {
        match self {
            Decision::Made(v) => Decision::Made(f(v)),
            Decision::Absent => Decision::Absent,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Decision<U>) -> Decision<U> {
        match self {
            Decision::Made(v) => f(v),
            Decision::Absent => Decision::Absent,
        }
    }
}

impl<T> From<Option<T>> for Decision<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Decision::Made(v),
            None => Decision::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinators() {
        let made: Decision<u8> = Decision::Made(2);
        assert_eq!(made.clone().map(|v| v * 2), Decision::Made(4));
        assert_eq!(made.and_then(|_| Decision::<u8>::Absent), Decision::Absent);
        assert_eq!(Decision::from(None::<u8>), Decision::Absent);
        assert_eq!(Decision::from(Some(1)).into_option(), Some(1));
    }
}
