//! Game configuration.
//!
//! Every section falls back to the tuning constants, so a config file only
//! needs the fields it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::events::sounds;
use crate::types::Bounds;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub player: PlayerConfig,
    #[serde(rename = "match")]
    pub match_rules: MatchConfig,
    pub audio: AudioConfig,
    pub background: BackgroundConfig,
    pub finish_line: FinishLineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_timeout_secs: f32,
    pub max_timeout_secs: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub spawn_points: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub boundary: Bounds,
    pub start_position: Vec2,
    pub max_health: i32,
    pub shoot_distance: f32,
    pub shoot_timeout_secs: f32,
    pub shoot_damage: i32,
    pub step_interval_secs: f32,
    /// Tracer origin relative to the player position.
    pub weapon_offset: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub min_kills_to_victory: u32,
    pub max_kills_to_victory: u32,
    pub base_damage_effect_secs: f32,
    pub victory_title: String,
    pub defeat_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sounds: Vec<SoundConfig>,
}

/// One entry of the sound bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub name: String,
    pub volume: f32,
    pub pitch: f32,
    /// Half-width of the random pitch range used when pitch randomization is requested.
    pub pitch_variation: f32,
    pub looped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub speed: f32,
    pub upper_bound: f32,
    pub lower_bound: f32,
}

/// Built-in spatial trigger. `None` leaves boundary crossings to the host,
/// which reports them with `PlayerCommand::ReachFinishLine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishLineConfig {
    pub y: Option<f32>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: ENEMY_MAX_HEALTH,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_timeout_secs: SPAWN_MIN_TIMEOUT,
            max_timeout_secs: SPAWN_MAX_TIMEOUT,
            min_speed: ENEMY_MIN_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            spawn_points: SPAWN_LANES_X
                .iter()
                .map(|&x| Vec2::new(x, SPAWN_ROW_Y))
                .collect(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            boundary: Bounds::new(PLAYER_BOUNDARY_MIN.into(), PLAYER_BOUNDARY_MAX.into()),
            start_position: PLAYER_START.into(),
            max_health: PLAYER_MAX_HEALTH,
            shoot_distance: PLAYER_SHOOT_DISTANCE,
            shoot_timeout_secs: PLAYER_SHOOT_TIMEOUT,
            shoot_damage: PLAYER_SHOOT_DAMAGE,
            step_interval_secs: PLAYER_STEP_INTERVAL,
            weapon_offset: PLAYER_WEAPON_OFFSET.into(),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(PLAYER_BOUNDARY_MIN.into(), PLAYER_BOUNDARY_MAX.into())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_kills_to_victory: MIN_KILLS_TO_VICTORY,
            max_kills_to_victory: MAX_KILLS_TO_VICTORY,
            base_damage_effect_secs: BASE_DAMAGE_EFFECT_DURATION,
            victory_title: VICTORY_TITLE.to_string(),
            defeat_title: DEFEAT_TITLE.to_string(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sounds: sounds::ALL
                .iter()
                .map(|&name| SoundConfig {
                    name: name.to_string(),
                    looped: name == sounds::BACKGROUND_MUSIC,
                    ..Default::default()
                })
                .collect(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            volume: 1.0,
            pitch: 1.0,
            pitch_variation: 0.1,
            looped: false,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            speed: BACKGROUND_SPEED,
            upper_bound: BACKGROUND_UPPER_BOUND,
            lower_bound: BACKGROUND_LOWER_BOUND,
        }
    }
}

impl Default for FinishLineConfig {
    fn default() -> Self {
        Self {
            y: Some(FINISH_LINE_Y),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the cross-field invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.enemy.max_health <= 0 {
            return invalid("enemy.max_health must be positive");
        }

        let spawn = &self.spawn;
        if spawn.spawn_points.is_empty() {
            return invalid("spawn.spawn_points must not be empty");
        }
        if spawn.min_timeout_secs < 0.0 || spawn.min_timeout_secs > spawn.max_timeout_secs {
            return invalid("spawn timeouts must satisfy 0 <= min <= max");
        }
        if spawn.min_speed < 0.0 || spawn.min_speed > spawn.max_speed {
            return invalid("spawn speeds must satisfy 0 <= min <= max");
        }

        let player = &self.player;
        if !player.boundary.is_valid() {
            return invalid("player.boundary min corner must not exceed max corner");
        }
        if player.max_health <= 0 {
            return invalid("player.max_health must be positive");
        }
        if player.shoot_timeout_secs < 0.0 || player.step_interval_secs <= 0.0 {
            return invalid("player timings must be positive");
        }
        if player.shoot_distance < 0.0 || player.move_speed < 0.0 {
            return invalid("player distances and speeds must not be negative");
        }

        let rules = &self.match_rules;
        if rules.min_kills_to_victory == 0 || rules.min_kills_to_victory > rules.max_kills_to_victory
        {
            return invalid("match kills must satisfy 1 <= min <= max");
        }
        if rules.base_damage_effect_secs < 0.0 {
            return invalid("match.base_damage_effect_secs must not be negative");
        }

        if self.background.lower_bound >= self.background.upper_bound {
            return invalid("background.lower_bound must be below upper_bound");
        }

        Ok(())
    }
}
