//! Nearest-target query over the active-enemy registry.
//!
//! Re-evaluated every frame; nothing is cached because both membership and
//! positions change continuously.

use glam::Vec2;

use outpost_core::types::EnemyId;

/// The candidate closest to `origin`, with its distance.
///
/// Ties go to the first candidate encountered. Returns `None` for an empty set.
pub fn nearest_active(
    candidates: impl IntoIterator<Item = (EnemyId, Vec2)>,
    origin: Vec2,
) -> Option<(EnemyId, f32)> {
    let mut nearest: Option<(EnemyId, f32)> = None;
    for (id, position) in candidates {
        let distance = origin.distance(position);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((id, distance)),
        }
    }
    nearest
}

/// The nearest candidate, but only if it is within `max_distance`.
pub fn target_within(
    candidates: impl IntoIterator<Item = (EnemyId, Vec2)>,
    origin: Vec2,
    max_distance: f32,
) -> Option<EnemyId> {
    nearest_active(candidates, origin)
        .filter(|&(_, distance)| distance <= max_distance)
        .map(|(id, _)| id)
}
