//! Zombie Blade - A wave-survival arena arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (spawning, steering, collisions, rounds)
//! - `highscores`: Top-10 leaderboard
//! - `platform`: Browser/native platform abstraction (key-value storage)
//! - `tuning`: Data-driven arena and combat constants
//! - `logging`: Logger setup for native and browser builds

pub mod highscores;
pub mod logging;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the headless runner (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted before clamping (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (world units, player at origin)
    pub const ARENA_RADIUS: f32 = 15.0;
    /// Enemies appear in a ring just inside the arena wall
    pub const SPAWN_RING_MIN: f32 = 13.0;
    pub const SPAWN_RING_BAND: f32 = 2.0;
    /// Per-enemy speed jitter so a wave doesn't march in lockstep
    pub const SPEED_VARIANCE_MIN: f32 = 0.8;
    pub const SPEED_VARIANCE_MAX: f32 = 1.2;

    /// Blade sweep radius around the player
    pub const WEAPON_REACH: f32 = 1.8;
    pub const ENEMY_BODY_RADIUS: f32 = 0.5;
    /// Must stay inside WEAPON_REACH + ENEMY_BODY_RADIUS
    pub const CONTACT_RADIUS: f32 = 0.8;
    pub const KNOCKBACK_DISTANCE: f32 = 2.0;

    /// Player
    pub const MAX_HEALTH: u32 = 100;
    pub const CONTACT_DAMAGE: u32 = 10;
    /// Base points per kill (multiplied by round number)
    pub const POINTS_PER_KILL: u64 = 100;

    /// Deferred timings (seconds of simulation time)
    pub const DEATH_EFFECT_DURATION: f64 = 0.6;
    pub const ROUND_TRANSITION_DELAY: f64 = 1.5;

    /// Round formula coefficients
    pub const BASE_ENEMY_COUNT: u32 = 3;
    pub const ENEMY_COUNT_PER_ROUND: u32 = 2;
    pub const BASE_ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_SPEED_PER_ROUND: f32 = 0.3;
    pub const ENEMY_HEALTH_STEP: u32 = 3;
    pub const BASE_SPAWN_INTERVAL: f64 = 2.0;
    pub const SPAWN_INTERVAL_DECAY: f64 = 0.1;
    pub const MIN_SPAWN_INTERVAL: f64 = 0.5;
}

/// Point on the ground plane (y = 0) at polar (r, theta) around the origin
#[inline]
pub fn ground_point(r: f32, theta: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}

/// Distance between two points, ignoring height
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    (d.x * d.x + d.z * d.z).sqrt()
}

/// Unit direction from `from` toward `to` on the ground plane (zero if coincident)
#[inline]
pub fn ground_direction(from: Vec3, to: Vec3) -> Vec3 {
    let d = to - from;
    Vec3::new(d.x, 0.0, d.z).normalize_or_zero()
}

/// Yaw (rotation about +Y) that faces along `dir`
#[inline]
pub fn yaw_of(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}
