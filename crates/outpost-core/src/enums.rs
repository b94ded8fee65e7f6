//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Match-level state machine.
///
/// NotStarted -> Running -> {Victory, Defeat} -> Running (on restart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    NotStarted,
    Running,
    Victory,
    Defeat,
}

/// Terminal result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

/// Lifecycle of a pooled enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// In the pool, hidden and motionless.
    #[default]
    Idle,
    /// In play: moving and targetable.
    Active,
}

/// Why an enemy's active lifetime ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    Killed,
    ReachedBoundary,
}

/// Tint of the base sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseTint {
    #[default]
    Regular,
    Damaged,
}

/// Playback state of a single sound in the bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl MatchPhase {
    /// Whether the match has reached an outcome.
    pub fn is_over(&self) -> bool {
        matches!(self, MatchPhase::Victory | MatchPhase::Defeat)
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self {
            MatchPhase::Victory => Some(MatchOutcome::Victory),
            MatchPhase::Defeat => Some(MatchOutcome::Defeat),
            MatchPhase::NotStarted | MatchPhase::Running => None,
        }
    }
}

impl From<MatchOutcome> for MatchPhase {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Victory => MatchPhase::Victory,
            MatchOutcome::Defeat => MatchPhase::Defeat,
        }
    }
}
