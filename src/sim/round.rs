//! Round parameters and round progression
//!
//! Difficulty is a pure function of the round number. The director watches
//! spawn/kill counts and schedules the pacing beat between waves.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty parameters for a single round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundParams {
    /// Enemies to spawn this round
    pub enemy_count: u32,
    /// Base enemy speed (units/sec, before per-enemy variance)
    pub enemy_speed: f32,
    /// Health of every enemy this round
    pub enemy_health: u32,
    /// Minimum seconds between spawns
    pub spawn_interval: f64,
}

impl RoundParams {
    /// Parameters for round `round` (1-based; 0 is treated as 1)
    pub fn for_round(round: u32) -> Self {
        let r = round.max(1);
        Self {
            enemy_count: BASE_ENEMY_COUNT + ENEMY_COUNT_PER_ROUND * r,
            enemy_speed: BASE_ENEMY_SPEED + ENEMY_SPEED_PER_ROUND * r as f32,
            enemy_health: 1 + r / ENEMY_HEALTH_STEP,
            spawn_interval: (BASE_SPAWN_INTERVAL - SPAWN_INTERVAL_DECAY * r as f64)
                .max(MIN_SPAWN_INTERVAL),
        }
    }
}

/// Where a round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Still spawning enemies
    Spawning,
    /// Everything spawned, some enemies still live
    Clearing,
    /// Everything spawned and cleared
    Complete,
}

/// Per-round counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current round number (1-based)
    pub number: u32,
    /// Enemies this round must spawn
    pub target: u32,
    /// Enemies spawned so far
    pub spawned: u32,
    /// Simulation time of the last spawn (or round start)
    pub last_spawn_at: f64,
    /// A transition to the next round has been scheduled
    pub transition_pending: bool,
}

impl RoundState {
    /// Fresh state for round `number` starting at time `now`
    pub fn start(number: u32, now: f64) -> Self {
        let number = number.max(1);
        Self {
            number,
            target: RoundParams::for_round(number).enemy_count,
            spawned: 0,
            last_spawn_at: now,
            transition_pending: false,
        }
    }

    /// Parameters for the current round (recomputed, never cached)
    pub fn params(&self) -> RoundParams {
        RoundParams::for_round(self.number)
    }

    /// Current phase given how many enemies are live
    pub fn phase(&self, live: usize) -> RoundPhase {
        if self.spawned < self.target {
            RoundPhase::Spawning
        } else if live > 0 {
            RoundPhase::Clearing
        } else {
            RoundPhase::Complete
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::start(1, 0.0)
    }
}

/// What the director wants done after observing a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectorAction {
    /// Nothing to do
    None,
    /// Schedule the advance to the next round at this time
    ScheduleAdvance { at: f64 },
}

/// Decides round completion and advances round state
pub struct RoundDirector;

impl RoundDirector {
    /// Observe the round after a tick. Returns a schedule request exactly once
    /// per round, on the first tick the round is complete.
    pub fn observe(round: &mut RoundState, live: usize, now: f64, delay: f64) -> DirectorAction {
        if round.transition_pending || round.phase(live) != RoundPhase::Complete {
            return DirectorAction::None;
        }
        round.transition_pending = true;
        log::info!(
            "Round {} cleared, next round in {:.1}s",
            round.number,
            delay
        );
        DirectorAction::ScheduleAdvance { at: now + delay }
    }

    /// Move on to the next round at time `now`
    pub fn advance(round: &mut RoundState, now: f64) {
        *round = RoundState::start(round.number + 1, now);
        let params = round.params();
        log::info!(
            "Round {} starting: {} enemies, speed {:.1}, health {}, interval {:.2}s",
            round.number,
            params.enemy_count,
            params.enemy_speed,
            params.enemy_health,
            params.spawn_interval
        );
    }
}
