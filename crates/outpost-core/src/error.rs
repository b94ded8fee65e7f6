//! Error types.
//!
//! Lookup misses (e.g. unknown sound names) are not errors: they are logged
//! and ignored. `StateError` covers caller contract violations, which are
//! rejected without changing any state.

use thiserror::Error;

use crate::types::EnemyId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The id's slot is idle, i.e. it was already returned to the pool.
    #[error("{0} is already in the pool")]
    DoubleRelease(EnemyId),
    /// The id refers to an earlier lifetime of its slot, or to no slot at all.
    #[error("{0} does not refer to a live enemy")]
    StaleEnemy(EnemyId),
    /// An enemy operation that requires the Active state was called on an idle enemy.
    #[error("{0} is not active")]
    EnemyInactive(EnemyId),
    #[error("a match is already running")]
    MatchInProgress,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
