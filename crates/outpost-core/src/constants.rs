//! Simulation constants and tuning defaults.
//!
//! Every tunable here is also the default of the matching `GameConfig` field.

/// Physics clock rate (Hz).
pub const PHYSICS_RATE: u32 = 50;

/// Seconds per physics step.
pub const FIXED_DT: f32 = 1.0 / PHYSICS_RATE as f32;

/// Nominal frame rate of the host loop (Hz).
pub const FRAME_RATE: u32 = 60;

/// Default frame delta used by `SimulationEngine::tick`.
pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

/// Upper bound on physics steps per frame, to avoid a catch-up spiral
/// after a long stall.
pub const MAX_PHYSICS_STEPS_PER_FRAME: u32 = 8;

// --- Enemies ---

/// Health an enemy is reset to on every acquisition.
pub const ENEMY_MAX_HEALTH: i32 = 3;

/// Slowest enemy speed (units/s).
pub const ENEMY_MIN_SPEED: f32 = 0.6;

/// Fastest enemy speed (units/s).
pub const ENEMY_MAX_SPEED: f32 = 1.4;

// --- Spawning ---

/// Shortest delay between spawns (seconds).
pub const SPAWN_MIN_TIMEOUT: f32 = 1.0;

/// Longest delay between spawns (seconds).
pub const SPAWN_MAX_TIMEOUT: f32 = 2.5;

/// Height of the spawn row, above the top of the visible field.
pub const SPAWN_ROW_Y: f32 = 6.0;

/// Horizontal spawn lanes along the spawn row.
pub const SPAWN_LANES_X: [f32; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

// --- Player ---

pub const PLAYER_MOVE_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: i32 = 5;
pub const PLAYER_SHOOT_DISTANCE: f32 = 2.0;

/// Cooldown between shots (seconds).
pub const PLAYER_SHOOT_TIMEOUT: f32 = 1.0;

pub const PLAYER_SHOOT_DAMAGE: i32 = 1;

/// Seconds of movement between footstep sounds.
pub const PLAYER_STEP_INTERVAL: f32 = 0.5;

/// Where the player is placed at the start of every match.
pub const PLAYER_START: (f32, f32) = (0.0, -3.0);

/// Movement rectangle, min corner.
pub const PLAYER_BOUNDARY_MIN: (f32, f32) = (-2.5, -4.0);

/// Movement rectangle, max corner.
pub const PLAYER_BOUNDARY_MAX: (f32, f32) = (2.5, -1.0);

/// Weapon anchor relative to the player position (tracer origin).
pub const PLAYER_WEAPON_OFFSET: (f32, f32) = (0.3, 0.2);

// --- Match ---

pub const MIN_KILLS_TO_VICTORY: u32 = 10;
pub const MAX_KILLS_TO_VICTORY: u32 = 20;

/// How long the base sprite stays tinted after a hit (seconds).
pub const BASE_DAMAGE_EFFECT_DURATION: f32 = 0.2;

pub const VICTORY_TITLE: &str = "Victory";
pub const DEFEAT_TITLE: &str = "Defeat";

// --- Finish line ---

/// Enemies at or below this height have reached the base.
pub const FINISH_LINE_Y: f32 = -4.5;

// --- Background ---

pub const BACKGROUND_SPEED: f32 = 1.0;
pub const BACKGROUND_UPPER_BOUND: f32 = 14.0;
pub const BACKGROUND_LOWER_BOUND: f32 = -14.0;
