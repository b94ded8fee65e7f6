//! Enemy object pool.
//!
//! Every enemy ever created is a hecs entity that stays alive for the pool's
//! whole lifetime; "destroying" an enemy only deactivates it and puts its
//! slot back on the idle stack. Each slot is in exactly one of idle or active
//! at any time, so `active + idle == total`.
//!
//! The active list doubles as the registry the targeting query scans.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, warn};

use outpost_core::error::StateError;
use outpost_core::events::sounds;
use outpost_core::state::{EnemyView, PoolView};
use outpost_core::types::{EnemyId, Position, Velocity};

use crate::enemy::{Enemy, EnemyEvent};
use crate::services::Services;

pub struct EnemyPool {
    world: World,
    /// Slot index -> entity. Never shrinks.
    slots: Vec<Entity>,
    /// Idle slots, used as a stack.
    idle: Vec<u32>,
    /// Active enemies. Order is irrelevant to gameplay but kept stable for determinism.
    active: Vec<EnemyId>,
    max_health: i32,
    events_tx: Sender<EnemyEvent>,
    events_rx: Receiver<EnemyEvent>,
}

impl EnemyPool {
    pub fn new(max_health: i32) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            world: World::new(),
            slots: Vec::new(),
            idle: Vec::new(),
            active: Vec::new(),
            max_health,
            events_tx,
            events_rx,
        }
    }

    /// Pre-create `count` idle enemies.
    pub fn warm(&mut self, count: usize) {
        for _ in 0..count {
            let slot = self.create();
            self.idle.push(slot);
        }
    }

    /// Take an idle enemy (creating one if none is idle), subscribe it to the
    /// pool's event channel, initialise it at `speed` and register it as active.
    pub fn acquire(&mut self, speed: f32) -> EnemyId {
        let slot = match self.idle.pop() {
            Some(slot) => slot,
            None => self.create(),
        };
        let sender = self.events_tx.clone();
        let (enemy, _position, velocity) = self.bundle_mut(slot);
        let id = enemy.activate();
        enemy.subscribe(sender);
        if let Err(err) = enemy.init(speed, velocity) {
            // Unreachable: the enemy was activated on the line above.
            warn!(%err, "enemy init failed after activation");
        }
        self.active.push(id);
        debug!(enemy = %id, speed, "enemy acquired");
        id
    }

    /// Return an active enemy to the pool.
    ///
    /// The subscription is dropped first, so the enemy cannot raise another
    /// event. Plays the destruction effect at the enemy's last position and
    /// returns that position.
    pub fn release(&mut self, id: EnemyId, services: &mut Services<'_>) -> Result<Vec2, StateError> {
        let at = self.reclaim(id)?;
        services.audio.play(sounds::EXPLOSION, false);
        services.presentation.explosion(at);
        debug!(enemy = %id, "enemy released");
        Ok(at)
    }

    /// Return every active enemy to the pool without destruction effects.
    /// Returns the reclaimed ids.
    pub fn reclaim_all(&mut self) -> Vec<EnemyId> {
        let ids = self.active.clone();
        for &id in &ids {
            if let Err(err) = self.reclaim(id) {
                warn!(%err, "failed to reclaim active enemy");
            }
        }
        // Events raised before the reclaim belong to lifetimes that just ended.
        while self.events_rx.try_recv().is_ok() {}
        ids
    }

    /// Next terminal event raised by an active enemy, if any.
    pub fn poll_event(&self) -> Option<EnemyEvent> {
        self.events_rx.try_recv().ok()
    }

    pub fn damage(&mut self, id: EnemyId, amount: i32) -> Result<(), StateError> {
        let (enemy, _, _) = self.live_bundle_mut(id)?;
        enemy.take_damage(amount)
    }

    pub fn reach_finish_line(&mut self, id: EnemyId) -> Result<(), StateError> {
        let (enemy, _, _) = self.live_bundle_mut(id)?;
        enemy.reach_finish_line()
    }

    pub fn set_position(&mut self, id: EnemyId, at: Vec2) -> Result<(), StateError> {
        let (_, position, _) = self.live_bundle_mut(id)?;
        *position = Position(at);
        Ok(())
    }

    /// Whether `id` refers to the current lifetime of an active enemy.
    pub fn is_live(&self, id: EnemyId) -> bool {
        self.live_entity(id).is_ok()
    }

    /// Position of a live enemy; `None` for idle or stale ids.
    pub fn position(&self, id: EnemyId) -> Option<Vec2> {
        let entity = self.live_entity(id).ok()?;
        let position = self.world.get::<&Position>(entity).ok()?;
        Some(position.0)
    }

    /// Active enemies with their positions, in registry order.
    pub fn active_positions(&self) -> Vec<(EnemyId, Vec2)> {
        self.active
            .iter()
            .filter_map(|&id| self.position(id).map(|at| (id, at)))
            .collect()
    }

    pub fn active_ids(&self) -> &[EnemyId] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Total instances ever created.
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    pub fn stats(&self) -> PoolView {
        PoolView {
            active: self.active_count(),
            idle: self.idle_count(),
            total: self.total(),
        }
    }

    pub fn views(&self) -> Vec<EnemyView> {
        self.active
            .iter()
            .filter_map(|&id| {
                let entity = self.live_entity(id).ok()?;
                let enemy = self.world.get::<&Enemy>(entity).ok()?;
                let position = self.world.get::<&Position>(entity).ok()?;
                let velocity = self.world.get::<&Velocity>(entity).ok()?;
                Some(EnemyView {
                    id,
                    position: position.0,
                    velocity: velocity.0,
                    health: enemy.health(),
                    max_health: enemy.max_health(),
                })
            })
            .collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn create(&mut self) -> u32 {
        let slot = self.slots.len() as u32;
        let entity = self.world.spawn((
            Enemy::new(slot, self.max_health),
            Position::default(),
            Velocity::default(),
        ));
        self.slots.push(entity);
        debug!(slot, "pool grew");
        slot
    }

    /// Release bookkeeping shared by `release` and `reclaim_all`.
    fn reclaim(&mut self, id: EnemyId) -> Result<Vec2, StateError> {
        let (enemy, position, velocity) = self.live_bundle_mut(id)?;
        enemy.unsubscribe();
        let at = position.0;
        enemy.deactivate(velocity);
        self.active.retain(|&active| active != id);
        self.idle.push(id.slot);
        Ok(at)
    }

    /// Resolve an id to its entity, rejecting idle and stale ids.
    fn live_entity(&self, id: EnemyId) -> Result<Entity, StateError> {
        let entity = *self
            .slots
            .get(id.slot as usize)
            .ok_or(StateError::StaleEnemy(id))?;
        let enemy = self
            .world
            .get::<&Enemy>(entity)
            .map_err(|_| StateError::StaleEnemy(id))?;
        if enemy.id() != id {
            return Err(StateError::StaleEnemy(id));
        }
        if !enemy.is_active() {
            return Err(StateError::DoubleRelease(id));
        }
        Ok(entity)
    }

    fn live_bundle_mut(
        &mut self,
        id: EnemyId,
    ) -> Result<(&mut Enemy, &mut Position, &mut Velocity), StateError> {
        let entity = self.live_entity(id)?;
        self.world
            .query_one_mut::<(&mut Enemy, &mut Position, &mut Velocity)>(entity)
            .map_err(|_| StateError::StaleEnemy(id))
    }

    fn bundle_mut(&mut self, slot: u32) -> (&mut Enemy, &mut Position, &mut Velocity) {
        let entity = self.slots[slot as usize];
        // Pooled entities are spawned once with the full bundle and never despawned.
        self.world
            .query_one_mut::<(&mut Enemy, &mut Position, &mut Velocity)>(entity)
            .expect("pooled enemy entity lost its components")
    }
}
