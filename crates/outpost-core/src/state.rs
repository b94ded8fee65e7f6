//! Game state snapshot: the complete visible state handed to the host each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent, PresentationEvent};
use crate::types::{EnemyId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
    pub kills_required: u32,
    /// Counts down from `kills_required`; the match is won when it reaches zero.
    pub kills_remaining: i32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub pool: PoolView,
    pub hud: HudView,
    /// Vertical offset of the scrolling background.
    pub background_y: f32,
    pub game_events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
    pub presentation_events: Vec<PresentationEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub target: Option<EnemyId>,
    /// Cooldown gate is open.
    pub can_shoot: bool,
    pub attacking: bool,
    pub controls_enabled: bool,
    pub moving: bool,
}

/// An active enemy on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: i32,
    pub max_health: i32,
}

/// Pool occupancy. `active + idle == total` always.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolView {
    pub active: usize,
    pub idle: usize,
    pub total: usize,
}

/// What the UI currently shows, as last pushed by the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub health_panel_visible: bool,
    pub health_text: i32,
    pub game_over_panel_visible: bool,
    pub game_over_title: Option<String>,
    pub base_tint: BaseTint,
}
