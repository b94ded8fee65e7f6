//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units. x = right, y = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Identity of a pooled enemy: the pool slot plus the acquisition generation.
///
/// A slot is reused across acquisitions; the generation makes a handle taken
/// during an earlier lifetime stale, so lookups through it return nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId {
    pub slot: u32,
    pub generation: u32,
}

/// Axis-aligned rectangle given by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// Simulation time tracking for the fixed physics clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Physics steps run so far.
    pub tick: u64,
    /// Frames run so far.
    pub frame: u64,
    /// Elapsed simulation time in seconds (sum of frame deltas).
    pub elapsed_secs: f64,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Straight-down velocity for the given speed.
    pub fn downward(speed: f32) -> Self {
        Self(Vec2::new(0.0, -speed))
    }
}

impl EnemyId {
    pub fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy#{}.{}", self.slot, self.generation)
    }
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Clamp a point into the rectangle, per axis.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Whether min <= max on both axes.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl SimTime {
    /// Advance by one physics step.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Advance by one frame of `dt` seconds.
    pub fn advance_frame(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }
}
