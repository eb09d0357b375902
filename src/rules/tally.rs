//! Vote counting with a deterministic tie-break.
//!
//! Absent targets are abstentions and are not counted. The candidate with
//! the strictly highest count wins; on equal counts the candidate that was
//! voted for first (in vote order) wins. The outcome reports whether the
//! top count was shared so callers can announce ties.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Label used when nobody received a vote.
pub const NO_ONE: &str = "no-one";

/// Result of a tally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyOutcome<T> {
    /// Winning candidate, `None` when no valid vote was cast.
    pub winner: Option<T>,
    /// Votes received by the winner (0 when there is no winner).
    pub count: usize,
    /// True when another candidate had the same top count.
    pub tied: bool,
}

impl<T> TallyOutcome<T> {
    /// The empty result: no winner, zero votes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            winner: None,
            count: 0,
            tied: false,
        }
    }

    /// Map the winner to another type, keeping count and tie flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TallyOutcome<U> {
        TallyOutcome {
            winner: self.winner.map(f),
            count: self.count,
            tied: self.tied,
        }
    }
}

impl<T: std::fmt::Display> TallyOutcome<T> {
    /// `(winner, count)` with `"no-one"` standing in for no winner.
    #[must_use]
    pub fn as_pair(&self) -> (String, usize) {
        let label = self
            .winner
            .as_ref()
            .map_or_else(|| NO_ONE.to_string(), ToString::to_string);
        (label, self.count)
    }
}

/// Majority vote counter.
///
/// ## Example
///
/// ```
/// use werewolf_engine::rules::VoteTally;
///
/// let outcome = VoteTally::tally([("A", Some("X")), ("B", Some("X")), ("C", Some("Y"))]);
/// assert_eq!(outcome.as_pair(), ("X".to_string(), 2));
///
/// let nobody = VoteTally::tally([("A", None::<&str>)]);
/// assert_eq!(nobody.as_pair(), ("no-one".to_string(), 0));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct VoteTally;

impl VoteTally {
    /// Count `(voter, target)` pairs in vote order.
    pub fn tally<V, T, I>(votes: I) -> TallyOutcome<T>
    where
        I: IntoIterator<Item = (V, Option<T>)>,
        T: Clone + Eq + Hash,
    {
        let mut counts: FxHashMap<T, usize> = FxHashMap::default();
        let mut first_seen: Vec<T> = Vec::new();

        for (_voter, target) in votes {
            let Some(target) = target else { continue };
            let count = counts.entry(target.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(target);
            }
            *count += 1;
        }

        let mut best: Option<(&T, usize)> = None;
        let mut tied = false;
        for candidate in &first_seen {
            let count = counts[candidate];
            match best {
                Some((_, top)) if count == top => tied = true,
                Some((_, top)) if count < top => {}
                _ => {
                    best = Some((candidate, count));
                    tied = false;
                }
            }
        }

        match best {
            Some((winner, count)) => TallyOutcome {
                winner: Some(winner.clone()),
                count,
                tied,
            },
            None => TallyOutcome::empty(),
        }
    }
}
