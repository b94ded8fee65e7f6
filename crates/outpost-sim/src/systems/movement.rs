//! Kinematic integration system.
//!
//! Updates Position from Velocity each physics step: position += velocity * dt.
//! Idle pooled enemies keep their last position.

use hecs::World;

use outpost_core::types::{Position, Velocity};

use crate::enemy::Enemy;

/// Run kinematic integration for every active enemy.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (enemy, pos, vel)) in world.query_mut::<(&Enemy, &mut Position, &Velocity)>() {
        if enemy.is_active() {
            pos.0 += vel.0 * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::pool::EnemyPool;

    use super::*;

    #[test]
    fn test_active_enemies_move_down() {
        let mut pool = EnemyPool::new(1);
        let id = pool.acquire(2.0);
        pool.set_position(id, Vec2::new(1.0, 6.0)).unwrap();

        run(pool.world_mut(), 0.5);
        assert_eq!(pool.position(id), Some(Vec2::new(1.0, 5.0)));
    }

    #[test]
    fn test_idle_enemies_stay_put() {
        let mut pool = EnemyPool::new(1);
        pool.warm(2);
        run(pool.world_mut(), 1.0);
        for (_entity, pos) in pool.world().query::<&Position>().iter() {
            assert_eq!(pos.0, Vec2::ZERO);
        }
    }
}
