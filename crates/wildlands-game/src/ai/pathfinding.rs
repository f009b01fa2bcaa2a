//! Direct-line steering on the flat ground plane (no obstacles).

use wildlands_world::Vec2;

/// Step from `current` toward `goal` by at most `max_step`, stopping `stop_at`
/// units short of the goal. Never overshoots.
pub fn step_toward(current: Vec2, goal: Vec2, max_step: f32, stop_at: f32) -> Vec2 {
    let offset = goal - current;
    let dist = offset.length();
    let remaining = dist - stop_at.max(0.0);
    if remaining <= 0.0 || max_step <= 0.0 {
        return current;
    }
    match offset.normalized() {
        Some(dir) => current + dir * remaining.min(max_step),
        None => current,
    }
}

/// Heading in degrees (0..360) from one position facing another.
///
/// Convention: 0 = +Z, 90 = -X, 180 = -Z, 270 = +X.
pub fn yaw_toward(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    let yaw = (-dx).atan2(dz).to_degrees();
    ((yaw % 360.0) + 360.0) % 360.0
}
