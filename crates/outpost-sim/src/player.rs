//! Player combat state machine: movement, footsteps, targeting, the attack
//! loop with its cooldown gate, and health.

use glam::Vec2;
use tracing::debug;

use outpost_core::config::PlayerConfig;
use outpost_core::events::sounds;
use outpost_core::state::PlayerView;
use outpost_core::types::EnemyId;

use crate::input::MovementInput;
use crate::pool::EnemyPool;
use crate::services::Services;
use crate::tasks::{FrameLoop, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    TookDamage { health: i32 },
    Died,
}

/// A shot fired this frame; the caller applies the damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub target: EnemyId,
    pub damage: i32,
}

type AnimationParams = (Option<Vec2>, Option<bool>, bool);

#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    position: Vec2,
    health: i32,
    dead: bool,
    /// Weak reference: the coordinator clears it when the enemy is released.
    target: Option<EnemyId>,
    attack_loop: FrameLoop,
    can_shoot: bool,
    cooldown: Timer,
    input: MovementInput,
    moving: bool,
    step_timer: f32,
    left_step: bool,
    last_animation: Option<AnimationParams>,
}

impl PlayerController {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            position: config.start_position,
            health: config.max_health,
            config,
            dead: false,
            target: None,
            attack_loop: FrameLoop::default(),
            can_shoot: true,
            cooldown: Timer::default(),
            input: MovementInput::default(),
            moving: false,
            step_timer: 0.0,
            left_step: false,
            last_animation: None,
        }
    }

    // ---- Accessors ----

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.config.max_health
    }

    pub fn shoot_distance(&self) -> f32 {
        self.config.shoot_distance
    }

    pub fn target(&self) -> Option<EnemyId> {
        self.target
    }

    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_loop.is_running()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_pending()
    }

    pub fn controls_enabled(&self) -> bool {
        self.input.is_enabled()
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            health: self.health,
            max_health: self.config.max_health,
            target: self.target,
            can_shoot: self.can_shoot,
            attacking: self.attack_loop.is_running(),
            controls_enabled: self.input.is_enabled(),
            moving: self.moving,
        }
    }

    // ---- Controls ----

    pub fn set_move_input(&mut self, value: Vec2) {
        self.input.set(value);
    }

    pub fn enable_controls(&mut self) {
        self.input.enable();
    }

    pub fn disable_controls(&mut self) {
        self.input.disable();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Back to full health at the start position with no target, no pending
    /// tasks and an open cooldown gate.
    pub fn reset_for_match(&mut self) {
        self.health = self.config.max_health;
        self.dead = false;
        self.position = self.config.start_position;
        self.set_target(None);
        self.cooldown.cancel();
        self.can_shoot = true;
        self.moving = false;
        self.step_timer = 0.0;
    }

    // ---- Physics clock ----

    /// Move by the current input, clamp to the boundary, and run footstep cadence.
    pub fn physics_step(&mut self, dt: f32, services: &mut Services<'_>) {
        let input = self.input.read();
        self.moving = input != Vec2::ZERO;
        self.animate(input, services);

        let next = self.position + input * self.config.move_speed * dt;
        self.position = self.config.boundary.clamp(next);

        if self.moving {
            self.step_timer += dt;
            if self.step_timer >= self.config.step_interval_secs {
                let step = if self.left_step {
                    sounds::LEFT_STEP
                } else {
                    sounds::RIGHT_STEP
                };
                services.audio.play(step, false);
                self.left_step = !self.left_step;
                self.step_timer = 0.0;
            }
        }
    }

    fn animate(&mut self, input: Vec2, services: &mut Services<'_>) {
        let params: AnimationParams = if self.moving {
            (Some(input), Some(input.x > 0.0), true)
        } else {
            (None, None, false)
        };
        if self.last_animation != Some(params) {
            services.presentation.player_animation(params.0, params.1, params.2);
            self.last_animation = Some(params);
        }
    }

    // ---- Frame clock ----

    /// Assign or clear the target. A target starts the attack loop if it is
    /// not already running; clearing cancels it.
    pub fn set_target(&mut self, target: Option<EnemyId>) {
        self.target = target;
        match target {
            Some(_) => {
                self.attack_loop.start();
            }
            None => {
                self.attack_loop.cancel();
            }
        }
    }

    /// Clear the target if it is `enemy`. Returns whether it was.
    pub fn forget_target(&mut self, enemy: EnemyId) -> bool {
        if self.target == Some(enemy) {
            self.set_target(None);
            true
        } else {
            false
        }
    }

    /// Advance the cooldown timer, reopening the gate when it elapses.
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown.tick(dt) {
            self.can_shoot = true;
        }
    }

    /// One iteration of the attack loop: fire at the target if the loop is
    /// running and the gate is open.
    pub fn attack(&mut self, pool: &EnemyPool, services: &mut Services<'_>) -> Option<Shot> {
        if !self.attack_loop.is_running() || !self.can_shoot {
            return None;
        }
        let target = self.target?;
        let target_position = pool.position(target)?;

        services
            .presentation
            .tracer(self.weapon_anchor(), target_position);
        services.presentation.attack_trigger();
        services.audio.play(sounds::SHOOT, false);
        self.start_cooldown();

        Some(Shot {
            target,
            damage: self.config.shoot_damage,
        })
    }

    fn weapon_anchor(&self) -> Vec2 {
        self.position + self.config.weapon_offset
    }

    /// Close the gate for `shoot_timeout`. A re-trigger while a cooldown is
    /// pending is ignored.
    fn start_cooldown(&mut self) {
        if self.cooldown.is_pending() {
            debug!("cooldown already pending, re-trigger ignored");
            return;
        }
        self.can_shoot = false;
        self.cooldown.start(self.config.shoot_timeout_secs);
    }

    // ---- Health ----

    /// Take one point of damage. Death cancels the attack loop and the
    /// cooldown and is reported once; later hits are ignored.
    pub fn take_damage(&mut self) -> Option<PlayerEvent> {
        if self.dead {
            return None;
        }
        self.health -= 1;
        if self.health <= 0 {
            self.dead = true;
            self.attack_loop.cancel();
            self.cooldown.cancel();
            debug!("player died");
            Some(PlayerEvent::Died)
        } else {
            Some(PlayerEvent::TookDamage {
                health: self.health,
            })
        }
    }
}
