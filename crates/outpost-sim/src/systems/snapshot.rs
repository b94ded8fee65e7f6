//! Snapshot system: reads the coordinator and pool and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only. Event buffers are drained by the caller and
//! handed in.

use outpost_core::events::{AudioEvent, GameEvent, PresentationEvent};
use outpost_core::state::GameStateSnapshot;
use outpost_core::types::SimTime;

use crate::coordinator::MatchCoordinator;

/// Collected output of one frame, moved into the snapshot.
#[derive(Debug, Default)]
pub struct FrameEvents {
    pub game: Vec<GameEvent>,
    pub audio: Vec<AudioEvent>,
    pub presentation: Vec<PresentationEvent>,
}

/// Build a complete GameStateSnapshot from the current match state.
pub fn build_snapshot(
    time: &SimTime,
    coordinator: &MatchCoordinator,
    background_y: f32,
    events: FrameEvents,
) -> GameStateSnapshot {
    let phase = coordinator.phase();
    let pool = coordinator.pool();

    GameStateSnapshot {
        time: *time,
        phase,
        outcome: phase.outcome(),
        kills_required: coordinator.kills_required(),
        kills_remaining: coordinator.kills_remaining(),
        player: coordinator.player().view(),
        enemies: pool.views(),
        pool: pool.stats(),
        hud: coordinator.hud().clone(),
        background_y,
        game_events: events.game,
        audio_events: events.audio,
        presentation_events: events.presentation,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use outpost_core::config::GameConfig;
    use outpost_core::enums::MatchPhase;

    use super::*;

    #[test]
    fn test_snapshot_reflects_pool_and_player() {
        let mut coordinator = MatchCoordinator::new(GameConfig::default());
        let enemy = coordinator.spawn_enemy_at(Vec2::new(1.0, 4.0), 1.0);

        let snapshot = build_snapshot(&SimTime::default(), &coordinator, 3.0, FrameEvents::default());
        assert_eq!(snapshot.phase, MatchPhase::NotStarted);
        assert_eq!(snapshot.outcome, None);
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(snapshot.enemies[0].id, enemy);
        assert_eq!(snapshot.pool.active, 1);
        assert_eq!(snapshot.player.health, GameConfig::default().player.max_health);
        assert_eq!(snapshot.background_y, 3.0);
    }
}
