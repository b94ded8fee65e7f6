//! Events emitted by the simulation for audio, presentation and match feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EnemyId;

/// Symbolic sound identifiers the simulation plays.
pub mod sounds {
    pub const EXPLOSION: &str = "Explosion";
    pub const SHOOT: &str = "Shoot";
    pub const WIN: &str = "Win";
    pub const LOOSE: &str = "Loose";
    pub const BACKGROUND_MUSIC: &str = "BackgroundMusic";
    pub const UI_BUTTON_CLICK: &str = "UIButtonClick";
    pub const LEFT_STEP: &str = "LeftStep";
    pub const RIGHT_STEP: &str = "RightStep";

    /// Every identifier above, in a stable order.
    pub const ALL: [&str; 8] = [
        EXPLOSION,
        SHOOT,
        WIN,
        LOOSE,
        BACKGROUND_MUSIC,
        UI_BUTTON_CLICK,
        LEFT_STEP,
        RIGHT_STEP,
    ];
}

/// What the sound bank actually did, for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    Played { sound: String, pitch: f32, volume: f32 },
    Stopped { sound: String },
    Paused { sound: String },
    Silenced { silenced: bool },
}

/// State pushed to the presentation layer. The simulation never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    /// Player animator parameters. `direction` is only updated while moving.
    PlayerAnimation {
        direction: Option<Vec2>,
        flip_x: Option<bool>,
        moving: bool,
    },
    /// One-shot attack animation cue.
    AttackTrigger,
    /// Bullet tracer from the weapon anchor to the target.
    Tracer { from: Vec2, to: Vec2 },
    /// Destruction effect at an enemy's last position.
    Explosion { at: Vec2 },
    HealthText { value: i32 },
    HealthPanel { visible: bool },
    GameOverPanel { visible: bool, title: Option<String> },
    BaseTint { tint: BaseTint },
}

/// Match-level notifications, in the order they were handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MatchStarted { kills_required: u32 },
    EnemySpawned { enemy: EnemyId, position: Vec2, speed: f32 },
    EnemyKilled { enemy: EnemyId, kills_remaining: i32 },
    EnemyReachedBoundary { enemy: EnemyId },
    PlayerTookDamage { health: i32 },
    PlayerDied,
    MatchEnded { outcome: MatchOutcome },
}
