//! Simulation engine: the headless core of the game.
//!
//! `SimulationEngine` owns the match coordinator, the collaborators and the
//! two clocks. Each call to `tick_frame` processes queued commands, runs as
//! many fixed physics steps as the frame's time allows, runs the per-frame
//! tasks once, and returns a `GameStateSnapshot`. No rendering or audio
//! backend is involved, so runs are deterministic per seed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use outpost_core::commands::PlayerCommand;
use outpost_core::config::GameConfig;
use outpost_core::constants::{FIXED_DT, FRAME_DT, MAX_PHYSICS_STEPS_PER_FRAME};
use outpost_core::enums::MatchPhase;
use outpost_core::error::ConfigError;
use outpost_core::events::sounds;
use outpost_core::state::GameStateSnapshot;
use outpost_core::types::SimTime;

use crate::audio::SoundBank;
use crate::coordinator::MatchCoordinator;
use crate::presentation::PresentationLog;
use crate::services::Services;
use crate::systems;
use crate::systems::background::Background;
use crate::systems::snapshot::FrameEvents;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

pub struct SimulationEngine {
    coordinator: MatchCoordinator,
    background: Background,
    audio: SoundBank,
    presentation: PresentationLog,
    time: SimTime,
    /// Frame time not yet consumed by physics steps.
    accumulator: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    music_started: bool,
}

impl SimulationEngine {
    /// Build an engine for `config`. The game config is validated first so
    /// that no random range drawn during the match can be inverted.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        // Pitch jitter has its own stream, separate from gameplay rolls.
        let audio_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        Ok(Self {
            audio: SoundBank::new(&config.game.audio, audio_rng),
            background: Background::new(config.game.background.clone()),
            coordinator: MatchCoordinator::new(config.game),
            presentation: PresentationLog::default(),
            time: SimTime::default(),
            accumulator: 0.0,
            rng,
            command_queue: VecDeque::new(),
            music_started: false,
        })
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one nominal frame.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_frame(FRAME_DT)
    }

    /// Advance by a frame of `dt` seconds and return the resulting snapshot.
    pub fn tick_frame(&mut self, dt: f32) -> GameStateSnapshot {
        let dt = dt.max(0.0);
        self.process_commands();
        self.run_physics(dt);

        let mut services = Services::new(&mut self.audio, &mut self.presentation);
        self.coordinator.frame_update(dt, &mut self.rng, &mut services);
        self.time.advance_frame(dt);

        let events = FrameEvents {
            game: self.coordinator.drain_events(),
            audio: self.audio.drain_events(),
            presentation: self.presentation.drain_events(),
        };
        systems::snapshot::build_snapshot(&self.time, &self.coordinator, self.background.y(), events)
    }

    pub fn phase(&self) -> MatchPhase {
        self.coordinator.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn coordinator(&self) -> &MatchCoordinator {
        &self.coordinator
    }

    pub fn sound_bank(&self) -> &SoundBank {
        &self.audio
    }

    /// Spawn an enemy at a fixed point, bypassing the scheduler (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, at: Vec2, speed: f32) -> outpost_core::types::EnemyId {
        self.coordinator.spawn_enemy_at(at, speed)
    }

    /// Fixed-rate steps for the frame's accumulated time. The backlog is
    /// dropped once a frame hits the step cap.
    fn run_physics(&mut self, dt: f32) {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            if steps == MAX_PHYSICS_STEPS_PER_FRAME {
                debug!(backlog = self.accumulator, "physics behind, dropping backlog");
                self.accumulator = 0.0;
                break;
            }
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.physics_step(FIXED_DT, &mut services);
            self.background.update(FIXED_DT);
            self.time.advance_tick();
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        let mut services = Services::new(&mut self.audio, &mut self.presentation);
        match command {
            PlayerCommand::StartGame => {
                if !self.music_started {
                    services.audio.play(sounds::BACKGROUND_MUSIC, false);
                    self.music_started = true;
                }
                if let Err(err) = self.coordinator.start_game(&mut self.rng, &mut services) {
                    warn!(%err, "start game rejected");
                }
            }
            PlayerCommand::Restart => {
                if !self.coordinator.phase().is_over() {
                    warn!(phase = ?self.coordinator.phase(), "restart ignored, no finished match");
                    return;
                }
                services.audio.play(sounds::UI_BUTTON_CLICK, false);
                info!("restarting match");
                if let Err(err) = self.coordinator.start_game(&mut self.rng, &mut services) {
                    warn!(%err, "restart rejected");
                }
            }
            PlayerCommand::SetMoveInput { x, y } => {
                self.coordinator.player_mut().set_move_input(Vec2::new(x, y));
            }
            PlayerCommand::ReachFinishLine { enemy } => {
                if let Err(err) = self.coordinator.reach_finish_line(enemy, &mut services) {
                    warn!(%err, "finish line report ignored");
                }
            }
            PlayerCommand::SetFocus { focused } => {
                services.audio.silence(!focused);
            }
            PlayerCommand::SetPaused { paused } => {
                services.audio.silence(paused);
            }
        }
    }
}
