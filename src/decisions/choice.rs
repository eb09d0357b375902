//! Typed decision payloads, one per phase.
//!
//! Field names follow the JSON answer formats in the phase instructions.
//! Each payload also accepts one alternative key. Answers go through a raw
//! record holding both keys, so a reply that sends both still parses; the
//! documented key wins.

use serde::{Deserialize, Serialize};

/// Both spellings of a target field, as received.
#[derive(Deserialize)]
struct RawTarget {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    kill: Option<String>,
    #[serde(default)]
    check: Option<String>,
    #[serde(default)]
    vote: Option<String>,
}

fn required(primary: Option<String>, alternative: Option<String>, field: &str) -> Result<String, String> {
    primary
        .or(alternative)
        .ok_or_else(|| format!("missing field `{field}`"))
}

/// Werewolf kill vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct KillChoice {
    pub target: String,
}

impl TryFrom<RawTarget> for KillChoice {
    type Error = String;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        required(raw.target, raw.kill, "target").map(|target| Self { target })
    }
}

/// Seer check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct CheckChoice {
    pub target: String,
}

impl TryFrom<RawTarget> for CheckChoice {
    type Error = String;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        required(raw.target, raw.check, "target").map(|target| Self { target })
    }
}

#[derive(Deserialize)]
struct RawWitch {
    #[serde(default)]
    use_antidote: bool,
    #[serde(default)]
    use_poison: bool,
    #[serde(default)]
    target_name: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

/// Witch potions. The antidote always applies to tonight's victim; the
/// poison needs `target_name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWitch")]
pub struct WitchChoice {
    pub use_antidote: bool,
    pub use_poison: bool,
    pub target_name: Option<String>,
}

impl From<RawWitch> for WitchChoice {
    fn from(raw: RawWitch) -> Self {
        Self {
            use_antidote: raw.use_antidote,
            use_poison: raw.use_poison,
            target_name: raw.target_name.or(raw.target),
        }
    }
}

/// Day exile vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct VoteChoice {
    pub vote: String,
}

impl TryFrom<RawTarget> for VoteChoice {
    type Error = String;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        required(raw.vote, raw.target, "vote").map(|vote| Self { vote })
    }
}

/// Hunter's last shot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootChoice {
    #[serde(default)]
    pub shoot: bool,
    #[serde(default)]
    pub target: Option<String>,
}
