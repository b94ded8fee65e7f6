//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::types::EnemyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start the first match (also plays the background music).
    StartGame,
    /// Restart button: UI click sound, then a fresh match.
    Restart,
    /// Current movement input vector. Ignored while controls are disabled.
    SetMoveInput { x: f32, y: f32 },
    /// External trigger: the enemy crossed the base boundary.
    ReachFinishLine { enemy: EnemyId },
    /// Application focus changed; audio is silenced while unfocused.
    SetFocus { focused: bool },
    /// Application paused or resumed; audio is silenced while paused.
    SetPaused { paused: bool },
}
