//! Match coordinator: wires pool, spawner, targeting and player together and
//! owns the match state machine.
//!
//! NotStarted -> Running -> {Victory, Defeat} -> Running (on restart).
//!
//! Enemy terminal events are dispatched synchronously, right after the call
//! that raised them, so a reaction always completes before the next task runs.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use outpost_core::config::GameConfig;
use outpost_core::enums::{BaseTint, MatchOutcome, MatchPhase, TerminalKind};
use outpost_core::error::StateError;
use outpost_core::events::{sounds, GameEvent};
use outpost_core::state::HudView;
use outpost_core::types::EnemyId;

use crate::enemy::EnemyEvent;
use crate::player::{PlayerController, PlayerEvent};
use crate::pool::EnemyPool;
use crate::services::Services;
use crate::spawner::SpawnScheduler;
use crate::systems;
use crate::targeting;
use crate::tasks::{FrameLoop, Timer};

pub struct MatchCoordinator {
    config: GameConfig,
    pool: EnemyPool,
    spawner: SpawnScheduler,
    player: PlayerController,
    phase: MatchPhase,
    kills_required: u32,
    kills_remaining: i32,
    targeting: FrameLoop,
    /// Pending base damage flashes. Each restores the regular tint when it elapses.
    base_flashes: Vec<Timer>,
    hud: HudView,
    events: Vec<GameEvent>,
}

impl MatchCoordinator {
    pub fn new(config: GameConfig) -> Self {
        Self {
            pool: EnemyPool::new(config.enemy.max_health),
            spawner: SpawnScheduler::new(config.spawn.clone()),
            player: PlayerController::new(config.player.clone()),
            config,
            phase: MatchPhase::NotStarted,
            kills_required: 0,
            kills_remaining: 0,
            targeting: FrameLoop::default(),
            base_flashes: Vec::new(),
            hud: HudView::default(),
            events: Vec::new(),
        }
    }

    // ---- Accessors ----

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn kills_required(&self) -> u32 {
        self.kills_required
    }

    pub fn kills_remaining(&self) -> i32 {
        self.kills_remaining
    }

    pub fn pool(&self) -> &EnemyPool {
        &self.pool
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn hud(&self) -> &HudView {
        &self.hud
    }

    pub fn is_targeting(&self) -> bool {
        self.targeting.is_running()
    }

    /// Take the match events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Match lifecycle ----

    /// Start a fresh match: draw the kill target, reclaim leftover enemies,
    /// reset the player and HUD, and start spawning and targeting.
    pub fn start_game(
        &mut self,
        rng: &mut ChaCha8Rng,
        services: &mut Services<'_>,
    ) -> Result<(), StateError> {
        if self.phase == MatchPhase::Running {
            return Err(StateError::MatchInProgress);
        }

        let reclaimed = self.pool.reclaim_all();
        if !reclaimed.is_empty() {
            debug!(count = reclaimed.len(), "reclaimed leftover enemies");
        }

        let rules = &self.config.match_rules;
        self.kills_required = rng.gen_range(rules.min_kills_to_victory..=rules.max_kills_to_victory);
        self.kills_remaining = self.kills_required as i32;

        self.spawner.start();

        self.player.reset_for_match();
        self.player.enable_controls();

        self.hud.health_panel_visible = true;
        services.presentation.health_panel(true);
        self.set_health_text(self.player.health(), services);
        self.hud.game_over_panel_visible = false;
        self.hud.game_over_title = None;
        services.presentation.game_over_panel(false, None);

        self.targeting.start();
        self.phase = MatchPhase::Running;

        info!(kills_required = self.kills_required, "match started");
        self.events.push(GameEvent::MatchStarted {
            kills_required: self.kills_required,
        });
        Ok(())
    }

    fn game_over(&mut self, outcome: MatchOutcome, services: &mut Services<'_>) {
        if self.phase != MatchPhase::Running {
            debug!(?outcome, phase = ?self.phase, "game over ignored, match not running");
            return;
        }

        self.targeting.cancel();
        self.player.disable_controls();
        self.player.set_target(None);
        self.hud.health_panel_visible = false;
        services.presentation.health_panel(false);
        self.spawner.stop();

        let (title, sound) = match outcome {
            MatchOutcome::Victory => (self.config.match_rules.victory_title.clone(), sounds::WIN),
            MatchOutcome::Defeat => (self.config.match_rules.defeat_title.clone(), sounds::LOOSE),
        };
        services.presentation.game_over_panel(true, Some(title.as_str()));
        self.hud.game_over_panel_visible = true;
        self.hud.game_over_title = Some(title);
        services.audio.play(sound, false);

        self.phase = outcome.into();
        info!(?outcome, "match ended");
        self.events.push(GameEvent::MatchEnded { outcome });
    }

    // ---- Clocks ----

    /// Fixed-step work: player movement, enemy kinematics, finish-line trigger.
    pub fn physics_step(&mut self, dt: f32, services: &mut Services<'_>) {
        self.player.physics_step(dt, services);
        systems::movement::run(self.pool.world_mut(), dt);

        if let Some(finish_y) = self.config.finish_line.y {
            for enemy in systems::finish_line::crossed(&self.pool, finish_y) {
                if let Err(err) = self.reach_finish_line(enemy, services) {
                    debug!(%err, "finish line skipped enemy");
                }
            }
        }
    }

    /// Per-frame tasks, in order: cooldown, spawning, targeting, attack, flashes.
    pub fn frame_update(&mut self, dt: f32, rng: &mut ChaCha8Rng, services: &mut Services<'_>) {
        self.player.tick_cooldown(dt);

        if let Some(spawned) = self.spawner.update(dt, &mut self.pool, rng) {
            self.events.push(GameEvent::EnemySpawned {
                enemy: spawned.enemy,
                position: spawned.position,
                speed: spawned.speed,
            });
        }

        if self.targeting.is_running() {
            self.update_target();
        }

        if let Some(shot) = self.player.attack(&self.pool, services) {
            if let Err(err) = self.damage_enemy(shot.target, shot.damage, services) {
                warn!(%err, "shot hit an enemy that is no longer live");
            }
        }

        self.tick_base_flashes(dt, services);
    }

    /// Point the player at the nearest active enemy within shooting distance,
    /// or clear the target.
    fn update_target(&mut self) {
        let target = targeting::target_within(
            self.pool.active_positions(),
            self.player.position(),
            self.player.shoot_distance(),
        );
        self.player.set_target(target);
    }

    fn tick_base_flashes(&mut self, dt: f32, services: &mut Services<'_>) {
        let before = self.base_flashes.len();
        self.base_flashes.retain_mut(|flash| !flash.tick(dt));
        let finished = before - self.base_flashes.len();
        for _ in 0..finished {
            self.set_base_tint(BaseTint::Regular, services);
        }
    }

    // ---- Entry points that raise enemy events ----

    /// Damage a live enemy and dispatch whatever it raises.
    pub fn damage_enemy(
        &mut self,
        enemy: EnemyId,
        amount: i32,
        services: &mut Services<'_>,
    ) -> Result<(), StateError> {
        self.pool.damage(enemy, amount)?;
        self.dispatch_enemy_events(services);
        Ok(())
    }

    /// Spatial trigger: the enemy crossed the base boundary.
    pub fn reach_finish_line(
        &mut self,
        enemy: EnemyId,
        services: &mut Services<'_>,
    ) -> Result<(), StateError> {
        self.pool.reach_finish_line(enemy)?;
        self.dispatch_enemy_events(services);
        Ok(())
    }

    /// Spawn an enemy outside the scheduler at a fixed point.
    pub fn spawn_enemy_at(&mut self, at: Vec2, speed: f32) -> EnemyId {
        let enemy = self.pool.acquire(speed);
        if let Err(err) = self.pool.set_position(enemy, at) {
            warn!(%err, "freshly acquired enemy rejected its position");
        }
        self.events.push(GameEvent::EnemySpawned {
            enemy,
            position: at,
            speed,
        });
        enemy
    }

    // ---- Event handlers ----

    fn dispatch_enemy_events(&mut self, services: &mut Services<'_>) {
        while let Some(EnemyEvent { enemy, kind }) = self.pool.poll_event() {
            if let Err(err) = self.pool.release(enemy, services) {
                debug!(%err, ?kind, "dropping event from a released enemy");
                continue;
            }
            self.player.forget_target(enemy);

            match kind {
                TerminalKind::Killed => self.on_enemy_killed(enemy, services),
                TerminalKind::ReachedBoundary => self.on_enemy_reached_boundary(enemy, services),
            }
        }
    }

    fn on_enemy_killed(&mut self, enemy: EnemyId, services: &mut Services<'_>) {
        self.player.set_target(None);
        if self.phase != MatchPhase::Running {
            debug!(%enemy, "kill after match end not counted");
            return;
        }
        self.kills_remaining -= 1;
        self.events.push(GameEvent::EnemyKilled {
            enemy,
            kills_remaining: self.kills_remaining,
        });
        if self.kills_remaining <= 0 {
            self.game_over(MatchOutcome::Victory, services);
        }
    }

    fn on_enemy_reached_boundary(&mut self, enemy: EnemyId, services: &mut Services<'_>) {
        self.events.push(GameEvent::EnemyReachedBoundary { enemy });

        self.set_base_tint(BaseTint::Damaged, services);
        self.base_flashes
            .push(Timer::started(self.config.match_rules.base_damage_effect_secs));

        if let Some(event) = self.player.take_damage() {
            self.on_player_event(event, services);
        }
    }

    fn on_player_event(&mut self, event: PlayerEvent, services: &mut Services<'_>) {
        match event {
            PlayerEvent::TookDamage { health } => {
                self.set_health_text(health, services);
                self.events.push(GameEvent::PlayerTookDamage { health });
            }
            PlayerEvent::Died => {
                self.events.push(GameEvent::PlayerDied);
                self.game_over(MatchOutcome::Defeat, services);
            }
        }
    }

    // ---- HUD ----

    fn set_health_text(&mut self, value: i32, services: &mut Services<'_>) {
        self.hud.health_text = value;
        services.presentation.health_text(value);
    }

    fn set_base_tint(&mut self, tint: BaseTint, services: &mut Services<'_>) {
        self.hud.base_tint = tint;
        services.presentation.base_tint(tint);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use outpost_core::config::{FinishLineConfig, MatchConfig, PlayerConfig};
    use outpost_core::events::PresentationEvent;

    use crate::audio::AudioLog;
    use crate::presentation::PresentationLog;

    use super::*;

    struct Harness {
        coordinator: MatchCoordinator,
        rng: ChaCha8Rng,
        audio: AudioLog,
        presentation: PresentationLog,
    }

    impl Harness {
        fn new(config: GameConfig) -> Self {
            Self {
                coordinator: MatchCoordinator::new(config),
                rng: ChaCha8Rng::seed_from_u64(5),
                audio: AudioLog::default(),
                presentation: PresentationLog::default(),
            }
        }

        fn start(&mut self) -> Result<(), StateError> {
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.start_game(&mut self.rng, &mut services)
        }

        fn frame(&mut self, dt: f32) {
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.frame_update(dt, &mut self.rng, &mut services);
        }

        fn physics(&mut self, dt: f32) {
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.physics_step(dt, &mut services);
        }

        fn damage(&mut self, enemy: EnemyId, amount: i32) -> Result<(), StateError> {
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.damage_enemy(enemy, amount, &mut services)
        }

        fn reach(&mut self, enemy: EnemyId) -> Result<(), StateError> {
            let mut services = Services::new(&mut self.audio, &mut self.presentation);
            self.coordinator.reach_finish_line(enemy, &mut services)
        }
    }

    /// One kill wins, no built-in finish line, player far from the spawn row.
    fn config() -> GameConfig {
        GameConfig {
            match_rules: MatchConfig {
                min_kills_to_victory: 1,
                max_kills_to_victory: 1,
                ..MatchConfig::default()
            },
            player: PlayerConfig {
                max_health: 2,
                ..PlayerConfig::default()
            },
            finish_line: FinishLineConfig { y: None },
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_start_game_resets_state() {
        let mut h = Harness::new(config());
        h.start().unwrap();

        let c = &h.coordinator;
        assert_eq!(c.phase(), MatchPhase::Running);
        assert_eq!(c.kills_required(), 1);
        assert!(c.spawner().is_running());
        assert!(c.is_targeting());
        assert!(c.player().controls_enabled());
        assert_eq!(c.player().health(), 2);
        assert!(c.hud().health_panel_visible);
        assert!(!c.hud().game_over_panel_visible);
        assert_eq!(c.hud().health_text, 2);
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        assert_eq!(h.start(), Err(StateError::MatchInProgress));
    }

    #[test]
    fn test_kill_reaching_zero_is_victory() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 5.0), 1.0);

        h.damage(enemy, 100).unwrap();

        let c = &h.coordinator;
        assert_eq!(c.phase(), MatchPhase::Victory);
        assert_eq!(c.kills_remaining(), 0);
        assert!(!c.spawner().is_running());
        assert!(!c.player().controls_enabled());
        assert!(!c.is_targeting());
        assert!(c.hud().game_over_panel_visible);
        assert_eq!(c.hud().game_over_title.as_deref(), Some("Victory"));
        assert_eq!(c.pool().active_count(), 0);
        assert!(h.audio.played.contains(&sounds::WIN.to_string()));
        assert!(h.audio.played.contains(&sounds::EXPLOSION.to_string()));
    }

    #[test]
    fn test_damage_after_kill_is_stale() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 5.0), 1.0);
        h.damage(enemy, 100).unwrap();
        assert_eq!(h.damage(enemy, 1), Err(StateError::DoubleRelease(enemy)));
    }

    #[test]
    fn test_reached_boundary_damages_player_and_flashes_base() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 5.0), 1.0);

        h.reach(enemy).unwrap();

        let c = &h.coordinator;
        assert_eq!(c.phase(), MatchPhase::Running);
        assert_eq!(c.player().health(), 1);
        assert_eq!(c.hud().health_text, 1);
        assert_eq!(c.hud().base_tint, BaseTint::Damaged);
        assert_eq!(c.pool().active_count(), 0);

        let flash = config().match_rules.base_damage_effect_secs;
        h.frame(flash / 2.0);
        assert_eq!(h.coordinator.hud().base_tint, BaseTint::Damaged);
        h.frame(flash);
        assert_eq!(h.coordinator.hud().base_tint, BaseTint::Regular);
    }

    #[test]
    fn test_player_death_is_defeat() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        let a = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 5.0), 1.0);
        let b = h.coordinator.spawn_enemy_at(Vec2::new(1.0, 5.0), 1.0);

        h.reach(a).unwrap();
        h.reach(b).unwrap();

        let c = &h.coordinator;
        assert_eq!(c.phase(), MatchPhase::Defeat);
        assert_eq!(c.hud().game_over_title.as_deref(), Some("Defeat"));
        assert!(!c.hud().health_panel_visible);
        assert!(!c.spawner().is_running());
        assert!(h.audio.played.contains(&sounds::LOOSE.to_string()));
    }

    #[test]
    fn test_outcome_transitions_once() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        let a = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 5.0), 1.0);
        let b = h.coordinator.spawn_enemy_at(Vec2::new(1.0, 5.0), 1.0);
        let c = h.coordinator.spawn_enemy_at(Vec2::new(2.0, 5.0), 1.0);

        h.damage(a, 100).unwrap();
        assert_eq!(h.coordinator.phase(), MatchPhase::Victory);

        // Losing all health afterwards does not flip the outcome.
        h.reach(b).unwrap();
        h.reach(c).unwrap();
        assert_eq!(h.coordinator.phase(), MatchPhase::Victory);

        let ended = h
            .coordinator
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::MatchEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_targeting_assigns_nearest_within_distance() {
        let mut h = Harness::new(config());
        h.start().unwrap();
        // Player starts at (0, -3) with shoot distance 2.
        let far = h.coordinator.spawn_enemy_at(Vec2::new(0.0, 3.0), 0.0);
        h.frame(0.0);
        assert_eq!(h.coordinator.player().target(), None);

        let near = h.coordinator.spawn_enemy_at(Vec2::new(0.5, -2.0), 0.0);
        h.frame(0.0);
        assert_eq!(h.coordinator.player().target(), Some(near));
        assert_ne!(h.coordinator.player().target(), Some(far));
    }

    #[test]
    fn test_attack_loop_kills_target_over_time() {
        let mut config = config();
        config.enemy.max_health = 2;
        let mut h = Harness::new(config);
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(0.0, -2.0), 0.0);

        // First frame: spawn from the scheduler may happen, but it is far away.
        h.frame(0.01);
        assert!(h.coordinator.pool().is_live(enemy));
        assert!(!h.coordinator.player().can_shoot());

        h.frame(1.0);
        assert!(!h.coordinator.pool().is_live(enemy));
        assert_eq!(h.coordinator.phase(), MatchPhase::Victory);

        let tracers = h
            .presentation
            .events()
            .iter()
            .filter(|e| matches!(e, PresentationEvent::Tracer { .. }))
            .count();
        assert_eq!(tracers, 2);
    }

    #[test]
    fn test_released_target_is_cleared() {
        let mut config = config();
        config.player.max_health = 5;
        let mut h = Harness::new(config);
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(0.0, -2.5), 0.0);
        h.frame(0.0);
        assert_eq!(h.coordinator.player().target(), Some(enemy));

        h.reach(enemy).unwrap();
        assert_eq!(h.coordinator.player().target(), None);
        assert!(!h.coordinator.player().is_attacking());
    }

    #[test]
    fn test_finish_line_trigger_in_physics_step() {
        let mut config = config();
        config.finish_line = FinishLineConfig { y: Some(-4.5) };
        config.player.max_health = 5;
        let mut h = Harness::new(config);
        h.start().unwrap();
        let enemy = h.coordinator.spawn_enemy_at(Vec2::new(2.0, -4.4), 10.0);

        h.physics(0.02);
        assert!(!h.coordinator.pool().is_live(enemy));
        assert_eq!(h.coordinator.player().health(), 4);
    }

    #[test]
    fn test_restart_after_defeat() {
        let mut config = config();
        config.player.max_health = 1;
        config.match_rules.min_kills_to_victory = 3;
        config.match_rules.max_kills_to_victory = 6;
        let mut h = Harness::new(config);
        h.start().unwrap();
        let leftover = h.coordinator.spawn_enemy_at(Vec2::new(2.0, 5.0), 1.0);
        let fatal = h.coordinator.spawn_enemy_at(Vec2::new(-2.0, 5.0), 1.0);
        h.reach(fatal).unwrap();
        assert_eq!(h.coordinator.phase(), MatchPhase::Defeat);

        h.start().unwrap();
        let c = &h.coordinator;
        assert_eq!(c.phase(), MatchPhase::Running);
        assert!((3..=6).contains(&c.kills_required()));
        assert_eq!(c.kills_remaining(), c.kills_required() as i32);
        assert_eq!(c.player().health(), 1);
        assert!(c.player().controls_enabled());
        assert!(c.hud().health_panel_visible);
        assert!(!c.hud().game_over_panel_visible);
        assert!(c.spawner().is_running());
        assert!(!c.pool().is_live(leftover));
        assert_eq!(c.pool().active_count(), 0);

        h.frame(0.016);
        assert_eq!(h.coordinator.pool().active_count(), 1);
    }
}
