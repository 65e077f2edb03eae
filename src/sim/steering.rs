//! Enemy steering: straight-line seek toward the player

use glam::Vec3;

use super::state::Enemy;
use crate::{ground_direction, yaw_of};

/// Move one enemy toward `target` by `speed * dt` and face it
pub fn seek(mut enemy: Enemy, target: Vec3, dt: f32) -> Enemy {
    let dir = ground_direction(enemy.pos, target);
    enemy.pos += dir * enemy.speed * dt;
    enemy.pos.y = 0.0;
    if dir != Vec3::ZERO {
        enemy.heading = yaw_of(dir);
    }
    enemy
}

/// Steer every live enemy; consumes the list and returns the moved one
pub fn steer_all(enemies: Vec<Enemy>, target: Vec3, dt: f32) -> Vec<Enemy> {
    enemies.into_iter().map(|e| seek(e, target, dt)).collect()
}
