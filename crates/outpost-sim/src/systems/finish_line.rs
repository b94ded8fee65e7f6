//! Finish-line trigger: active enemies at or below the line have reached the base.

use outpost_core::types::EnemyId;

use crate::pool::EnemyPool;

/// Active enemies whose position is at or below `finish_y`, in registry order.
pub fn crossed(pool: &EnemyPool, finish_y: f32) -> Vec<EnemyId> {
    pool.active_positions()
        .into_iter()
        .filter(|(_, at)| at.y <= finish_y)
        .map(|(id, _)| id)
        .collect()
}
