//! Enemy state machine.
//!
//! Idle (pooled) -> Active (health = max, moving down) -> {Killed, ReachedBoundary} -> Idle.
//!
//! Terminal events go out through the enemy's subscription, a sender on the
//! pool's event channel. The pool installs it on acquire and drops it on
//! release, so an enemy that is back in the pool cannot deliver anything.

use std::sync::mpsc::Sender;

use tracing::debug;

use outpost_core::enums::{EnemyState, TerminalKind};
use outpost_core::error::StateError;
use outpost_core::types::{EnemyId, Velocity};

/// A terminal event raised by an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyEvent {
    pub enemy: EnemyId,
    pub kind: TerminalKind,
}

/// Enemy component. Lives on a hecs entity next to `Position` and `Velocity`.
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    state: EnemyState,
    health: i32,
    max_health: i32,
    speed: f32,
    /// Set once health drops to zero; blocks further damage in this lifetime.
    killed: bool,
    subscription: Option<Sender<EnemyEvent>>,
}

impl Enemy {
    pub fn new(slot: u32, max_health: i32) -> Self {
        Self {
            id: EnemyId::new(slot, 0),
            state: EnemyState::Idle,
            health: max_health,
            max_health,
            speed: 0.0,
            killed: false,
            subscription: None,
        }
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Active
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Idle -> Active. Starts a new lifetime and returns its id.
    pub fn activate(&mut self) -> EnemyId {
        self.id.generation = self.id.generation.wrapping_add(1);
        self.state = EnemyState::Active;
        self.killed = false;
        self.id
    }

    pub fn subscribe(&mut self, sender: Sender<EnemyEvent>) {
        self.subscription = Some(sender);
    }

    /// Drop the subscription. Returns whether one was installed.
    pub fn unsubscribe(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Reset health and start moving down at `speed`.
    pub fn init(&mut self, speed: f32, velocity: &mut Velocity) -> Result<(), StateError> {
        self.ensure_active()?;
        self.speed = speed;
        self.health = self.max_health;
        *velocity = Velocity::downward(speed);
        Ok(())
    }

    /// Apply damage. Crossing zero raises exactly one Killed event; after that
    /// the enemy ignores damage until its next lifetime.
    pub fn take_damage(&mut self, amount: i32) -> Result<(), StateError> {
        self.ensure_active()?;
        if self.killed {
            debug!(enemy = %self.id, "damage ignored, already killed");
            return Ok(());
        }
        self.health -= amount;
        if self.health <= 0 {
            self.killed = true;
            self.emit(TerminalKind::Killed);
        }
        Ok(())
    }

    /// Raised by the spatial trigger when the enemy crosses the base boundary.
    pub fn reach_finish_line(&mut self) -> Result<(), StateError> {
        self.ensure_active()?;
        self.emit(TerminalKind::ReachedBoundary);
        Ok(())
    }

    /// Active -> Idle. Zeroes velocity so a reused instance starts still.
    pub fn deactivate(&mut self, velocity: &mut Velocity) {
        self.state = EnemyState::Idle;
        self.speed = 0.0;
        *velocity = Velocity::default();
    }

    fn ensure_active(&self) -> Result<(), StateError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StateError::EnemyInactive(self.id))
        }
    }

    fn emit(&self, kind: TerminalKind) {
        if let Some(sender) = &self.subscription {
            // The receiver lives as long as the pool that owns this enemy.
            let _ = sender.send(EnemyEvent {
                enemy: self.id,
                kind,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn active_enemy(max_health: i32) -> (Enemy, mpsc::Receiver<EnemyEvent>, Velocity) {
        let (tx, rx) = mpsc::channel();
        let mut enemy = Enemy::new(0, max_health);
        let mut velocity = Velocity::default();
        enemy.activate();
        enemy.subscribe(tx);
        enemy.init(1.5, &mut velocity).unwrap();
        (enemy, rx, velocity)
    }

    #[test]
    fn test_init_sets_health_and_downward_velocity() {
        let (enemy, _rx, velocity) = active_enemy(3);
        assert_eq!(enemy.health(), 3);
        assert_eq!(velocity, Velocity::new(0.0, -1.5));
        assert_eq!(enemy.speed(), 1.5);
    }

    #[test]
    fn test_init_requires_active() {
        let mut enemy = Enemy::new(0, 3);
        let mut velocity = Velocity::default();
        assert_eq!(
            enemy.init(1.0, &mut velocity),
            Err(StateError::EnemyInactive(enemy.id()))
        );
        assert_eq!(velocity, Velocity::default());
    }

    #[test]
    fn test_lethal_damage_emits_exactly_one_killed() {
        let (mut enemy, rx, _) = active_enemy(3);
        enemy.take_damage(1).unwrap();
        assert!(rx.try_recv().is_err());

        enemy.take_damage(5).unwrap();
        enemy.take_damage(1).unwrap();
        enemy.take_damage(1).unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![EnemyEvent {
                enemy: enemy.id(),
                kind: TerminalKind::Killed,
            }]
        );
        // Damage after the kill is not processed.
        assert_eq!(enemy.health(), -3);
    }

    #[test]
    fn test_exact_lethal_damage() {
        let (mut enemy, rx, _) = active_enemy(2);
        enemy.take_damage(2).unwrap();
        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_reach_finish_line_emits() {
        let (mut enemy, rx, _) = active_enemy(3);
        enemy.reach_finish_line().unwrap();
        assert_eq!(
            rx.try_recv().unwrap().kind,
            TerminalKind::ReachedBoundary
        );
    }

    #[test]
    fn test_unsubscribed_enemy_is_silent() {
        let (mut enemy, rx, _) = active_enemy(1);
        assert!(enemy.unsubscribe());
        enemy.take_damage(1).unwrap();
        assert!(rx.try_recv().is_err());
        assert!(!enemy.unsubscribe());
    }

    #[test]
    fn test_deactivate_zeroes_velocity() {
        let (mut enemy, _rx, mut velocity) = active_enemy(3);
        enemy.deactivate(&mut velocity);
        assert_eq!(velocity, Velocity::default());
        assert!(!enemy.is_active());
        assert_eq!(
            enemy.take_damage(1),
            Err(StateError::EnemyInactive(enemy.id()))
        );
    }

    #[test]
    fn test_activate_bumps_generation() {
        let mut enemy = Enemy::new(4, 3);
        let first = enemy.activate();
        let mut velocity = Velocity::default();
        enemy.deactivate(&mut velocity);
        let second = enemy.activate();
        assert_eq!(first.slot, 4);
        assert_eq!(second.slot, 4);
        assert_ne!(first, second);
    }
}
