//! Collision and damage resolution
//!
//! Runs after steering. Every enemy lands in exactly one bucket per tick:
//! still live, killed by the blade, or reached the player. The blade check
//! always goes first, so an enemy that jumped past both radii in one tick is
//! a blade hit and never also damages the player.

use glam::Vec3;

use super::state::Enemy;
use crate::ground_distance;
use crate::tuning::Tuning;

/// How one enemy interacts with the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Inside blade reach
    Blade,
    /// Inside contact radius (and somehow not in blade reach)
    Reached,
    /// Out of range
    Clear,
}

/// Classify an enemy by distance, blade first
pub fn classify(enemy: &Enemy, player: Vec3, tuning: &Tuning) -> Contact {
    let dist = ground_distance(enemy.pos, player);
    if dist < tuning.weapon_threshold() {
        Contact::Blade
    } else if dist < tuning.contact_radius {
        Contact::Reached
    } else {
        Contact::Clear
    }
}

/// Partition of the live list after one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Still in play (including knocked-back enemies)
    pub live: Vec<Enemy>,
    /// Health hit zero this tick
    pub killed: Vec<Enemy>,
    /// Reached the player this tick
    pub reached: Vec<Enemy>,
}

impl Resolution {
    pub fn kill_count(&self) -> u32 {
        self.killed.len() as u32
    }

    pub fn contact_count(&self) -> u32 {
        self.reached.len() as u32
    }
}

/// Push an enemy directly away from the player
pub fn knock_back(enemy: &mut Enemy, player: Vec3, distance: f32) {
    let away = crate::ground_direction(player, enemy.pos);
    enemy.pos += away * distance;
}

/// Resolve blade hits and player contacts for every enemy
pub fn resolve(enemies: Vec<Enemy>, player: Vec3, tuning: &Tuning) -> Resolution {
    let mut out = Resolution {
        live: Vec::with_capacity(enemies.len()),
        ..Default::default()
    };

    for mut enemy in enemies {
        match classify(&enemy, player, tuning) {
            Contact::Blade => {
                enemy.health = enemy.health.saturating_sub(1);
                if enemy.health == 0 {
                    log::debug!("Enemy {} killed", enemy.id);
                    out.killed.push(enemy);
                } else {
                    // Push out of reach so one sweep doesn't land several hits
                    knock_back(&mut enemy, player, tuning.knockback_distance);
                    out.live.push(enemy);
                }
            }
            Contact::Reached => {
                log::debug!("Enemy {} reached the player", enemy.id);
                out.reached.push(enemy);
            }
            Contact::Clear => out.live.push(enemy),
        }
    }

    out
}
