//! Render snapshot
//!
//! Copies what a renderer/HUD needs out of [`GameState`] into a plain,
//! serializable struct so the presentation layer never touches sim internals.

use glam::Vec3;
use serde::Serialize;

use super::round::RoundPhase;
use super::state::{GamePhase, GameState, HealthBand};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec3,
    pub health: u32,
    pub heading: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub id: u32,
    pub pos: Vec3,
    pub created_at: f64,
    /// 0.0 at the kill, 1.0 when the effect expires
    pub progress: f32,
}

/// Everything one rendered frame needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub round_phase: RoundPhase,
    pub arena_radius: f32,
    /// Between rounds, waiting for the next wave
    pub intermission: bool,
    pub health: u32,
    pub health_band: HealthBand,
    pub score: u64,
    pub kills: u32,
    pub enemies: Vec<EnemyView>,
    pub effects: Vec<EffectView>,
}

impl RenderSnapshot {
    /// In the menu the stats still describe the last run (the title screen
    /// can show them); enemies are always empty there.
    pub fn capture(state: &GameState) -> Self {
        let duration = state.tuning.death_effect_duration;
        Self {
            phase: state.phase,
            round: state.round.number,
            round_phase: state.round.phase(state.enemies.len()),
            arena_radius: state.tuning.arena_radius,
            intermission: state.round.transition_pending,
            health: state.player.health,
            health_band: state.player.health_band(),
            score: state.player.score,
            kills: state.player.kills,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    health: e.health,
                    heading: e.heading,
                })
                .collect(),
            effects: state
                .effects
                .iter()
                .map(|fx| EffectView {
                    id: fx.id,
                    pos: fx.pos,
                    created_at: fx.created_at,
                    progress: ((state.clock - fx.created_at) / duration).clamp(0.0, 1.0) as f32,
                })
                .collect(),
        }
    }
}
