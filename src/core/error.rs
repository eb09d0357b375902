//! Error taxonomy.
//!
//! Only `GameError` ever reaches the caller of the orchestrator.
//! `ProviderError` is downgraded to an absent decision at the phase
//! boundary and `SinkError` is logged and dropped by the publisher.
//! An absent decision or an empty tally is a value, not an error.

use thiserror::Error;

/// Fatal errors that end a game run.
#[derive(Debug, Error)]
pub enum GameError {
    /// Invalid setup parameters. Raised before any phase runs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal state lost consistency (e.g. a dead player still on a roster).
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl GameError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        GameError::Configuration(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        GameError::Invariant(msg.into())
    }
}

/// Failure reported by a decision provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Credentials or endpoint configuration are missing.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// The provider could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider was reached but failed to answer.
    #[error("provider failed: {0}")]
    Failed(String),
}

/// Failure delivering an event to a transport sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("sink closed")]
    Closed,

    #[error("sink failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::configuration("player count must be at least 1").to_string(),
            "configuration error: player count must be at least 1"
        );
        assert_eq!(
            ProviderError::MissingCredentials("API key".into()).to_string(),
            "missing credentials: API key"
        );
        assert_eq!(SinkError::Closed.to_string(), "sink closed");
    }
}
