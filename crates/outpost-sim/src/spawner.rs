//! Spawn scheduler: an unbounded periodic task that pulls enemies from the pool.
//!
//! Each iteration acquires an enemy, places it at a random spawn point and
//! waits a random delay before the next one. Stopping the task leaves
//! already-spawned enemies alone.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use outpost_core::config::SpawnConfig;
use outpost_core::types::EnemyId;

use crate::pool::EnemyPool;
use crate::tasks::{FrameLoop, Timer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawned {
    pub enemy: EnemyId,
    pub position: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    task: FrameLoop,
    delay: Timer,
}

impl SpawnScheduler {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            task: FrameLoop::default(),
            delay: Timer::default(),
        }
    }

    /// Begin spawning. The first enemy comes on the next update.
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self) -> bool {
        if !self.task.start() {
            return false;
        }
        self.delay.start(0.0);
        debug!("spawn scheduler started");
        true
    }

    /// Cancel the task. No-op if not running.
    pub fn stop(&mut self) -> bool {
        self.delay.cancel();
        let was_running = self.task.cancel();
        if was_running {
            debug!("spawn scheduler stopped");
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Seconds until the next spawn, if running.
    pub fn next_spawn_in(&self) -> Option<f32> {
        self.delay.remaining_secs()
    }

    /// Advance by one frame. Spawns at most one enemy.
    pub fn update(&mut self, dt: f32, pool: &mut EnemyPool, rng: &mut ChaCha8Rng) -> Option<Spawned> {
        if !self.task.is_running() || !self.delay.tick(dt) {
            return None;
        }

        let speed = rng.gen_range(self.config.min_speed..=self.config.max_speed);
        let position = self.config.spawn_points.choose(rng).copied();
        let wait = rng.gen_range(self.config.min_timeout_secs..=self.config.max_timeout_secs);
        self.delay.start(wait);

        let Some(position) = position else {
            warn!("no spawn points configured, skipping spawn");
            return None;
        };
        let enemy = pool.acquire(speed);
        if let Err(err) = pool.set_position(enemy, position) {
            warn!(%err, "freshly acquired enemy rejected its spawn point");
        }

        Some(Spawned {
            enemy,
            position,
            speed,
        })
    }
}
