//! Data-driven arena and combat tuning
//!
//! Every field falls back to the reference arena value from [`crate::consts`],
//! so a tuning file only needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Arena geometry, combat and pacing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_radius: f32,
    pub spawn_ring_min: f32,
    pub spawn_ring_band: f32,
    pub speed_variance_min: f32,
    pub speed_variance_max: f32,
    pub weapon_reach: f32,
    pub enemy_body_radius: f32,
    pub contact_radius: f32,
    pub knockback_distance: f32,
    pub max_health: u32,
    pub contact_damage: u32,
    pub points_per_kill: u64,
    /// Seconds a death effect stays visible
    pub death_effect_duration: f64,
    /// Pause between a cleared round and the next one
    pub round_transition_delay: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            spawn_ring_min: SPAWN_RING_MIN,
            spawn_ring_band: SPAWN_RING_BAND,
            speed_variance_min: SPEED_VARIANCE_MIN,
            speed_variance_max: SPEED_VARIANCE_MAX,
            weapon_reach: WEAPON_REACH,
            enemy_body_radius: ENEMY_BODY_RADIUS,
            contact_radius: CONTACT_RADIUS,
            knockback_distance: KNOCKBACK_DISTANCE,
            max_health: MAX_HEALTH,
            contact_damage: CONTACT_DAMAGE,
            points_per_kill: POINTS_PER_KILL,
            death_effect_duration: DEATH_EFFECT_DURATION,
            round_transition_delay: ROUND_TRANSITION_DELAY,
        }
    }
}

impl Tuning {
    /// Distance below which the blade hits an enemy
    pub fn weapon_threshold(&self) -> f32 {
        self.weapon_reach + self.enemy_body_radius
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check cross-field constraints the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("arena_radius", self.arena_radius.into())?;
        positive("spawn_ring_min", self.spawn_ring_min.into())?;
        positive("weapon_reach", self.weapon_reach.into())?;
        positive("contact_radius", self.contact_radius.into())?;
        positive("death_effect_duration", self.death_effect_duration)?;
        positive("round_transition_delay", self.round_transition_delay)?;
        positive("max_health", self.max_health.into())?;

        if self.spawn_ring_band < 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_ring_band",
                reason: "must not be negative".into(),
            });
        }
        if self.speed_variance_min <= 0.0 || self.speed_variance_min > self.speed_variance_max {
            return Err(TuningError::Invalid {
                field: "speed_variance_min",
                reason: format!(
                    "must be positive and <= speed_variance_max ({})",
                    self.speed_variance_max
                ),
            });
        }
        // Contact must be strictly inside blade reach so a blade hit always wins
        if self.contact_radius >= self.weapon_threshold() {
            return Err(TuningError::Invalid {
                field: "contact_radius",
                reason: format!(
                    "must be smaller than weapon reach + body radius ({})",
                    self.weapon_threshold()
                ),
            });
        }
        if self.spawn_ring_min <= self.weapon_threshold() {
            return Err(TuningError::Invalid {
                field: "spawn_ring_min",
                reason: "enemies would spawn inside blade reach".into(),
            });
        }
        Ok(())
    }
}
