//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::round::RoundState;
use super::schedule::{Schedule, ScheduledAction};
use crate::tuning::Tuning;
use crate::{ground_direction, yaw_of};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, simulation idle
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or menu
    GameOver,
}

/// An enemy walking toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Position on the ground plane (y = 0)
    pub pos: Vec3,
    /// Units per second
    pub speed: f32,
    /// Remaining blade hits; always >= 1 while live
    pub health: u32,
    /// Yaw facing the player (rendering only)
    pub heading: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, speed: f32, health: u32) -> Self {
        Self {
            id,
            pos,
            speed,
            health: health.max(1),
            heading: yaw_of(ground_direction(pos, Vec3::ZERO)),
        }
    }
}

/// Cosmetic marker left where an enemy was killed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathEffect {
    /// Id of the killed enemy
    pub id: u32,
    pub pos: Vec3,
    /// Simulation time of the kill
    pub created_at: f64,
}

/// HUD health band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

/// Player health and progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// 0..=max health
    pub health: u32,
    pub score: u64,
    pub kills: u32,
}

impl PlayerStats {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            score: 0,
            kills: 0,
        }
    }

    /// Award a tick's kills in one step. Returns the points awarded.
    pub fn apply_kills(&mut self, kills: u32, round: u32, points_per_kill: u64) -> u64 {
        let points = kills as u64 * points_per_kill * round as u64;
        self.score += points;
        self.kills += kills;
        points
    }

    /// Apply damage for enemies that reached the player. Returns damage dealt.
    pub fn apply_contacts(&mut self, contacts: u32, damage: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(contacts.saturating_mul(damage));
        before - self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Colour band used by the HUD
    pub fn health_band(&self) -> HealthBand {
        match self.health {
            h if h > 60 => HealthBand::Healthy,
            h if h > 30 => HealthBand::Wounded,
            _ => HealthBand::Critical,
        }
    }
}

/// Final numbers of a finished run (for score submission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub round: u32,
    pub kills: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn randomness
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Bumped on every start/restart; stale deferred actions compare against it
    pub session: u32,
    /// Current round counters
    pub round: RoundState,
    /// Player health/score/kills
    pub player: PlayerStats,
    /// Live enemies (ascending id)
    pub enemies: Vec<Enemy>,
    /// Death effects awaiting expiry
    pub effects: Vec<DeathEffect>,
    /// Deferred actions
    pub schedule: Schedule,
    /// Arena and combat constants
    pub tuning: Tuning,
    /// Latest simulation time seen by a tick or command
    pub clock: f64,
    /// Set when the last run ended
    pub last_summary: Option<GameOverSummary>,
    /// Next entity ID (never reset, so ids stay unique across restarts)
    next_id: u32,
}

impl GameState {
    /// Create a new game state (in the menu) with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            session: 0,
            round: RoundState::default(),
            player: PlayerStats::new(tuning.max_health),
            enemies: Vec::new(),
            effects: Vec::new(),
            schedule: Schedule::new(),
            tuning,
            clock: 0.0,
            last_summary: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything and begin round 1 at time `now`
    pub fn start_game(&mut self, now: f64) {
        self.session += 1;
        self.clock = now;
        self.phase = GamePhase::Playing;
        self.round = RoundState::start(1, now);
        self.player = PlayerStats::new(self.tuning.max_health);
        self.enemies.clear();
        self.effects.clear();
        self.last_summary = None;
        log::info!(
            "Game started (session {}), round 1: {} enemies",
            self.session,
            self.round.target
        );
    }

    /// Same as [`GameState::start_game`]
    pub fn restart(&mut self, now: f64) {
        self.start_game(now);
    }

    /// Back to the title screen. Player stats and round keep the last run's
    /// values until the next start resets everything.
    pub fn go_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.enemies.clear();
    }

    /// End the run and record its summary
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let summary = GameOverSummary {
            score: self.player.score,
            round: self.round.number,
            kills: self.player.kills,
        };
        log::info!(
            "Game over: score {}, round {}, kills {}",
            summary.score,
            summary.round,
            summary.kills
        );
        self.phase = GamePhase::GameOver;
        self.last_summary = Some(summary);
    }

    /// Hand out the finished run's summary once; later calls get `None`
    /// until another run ends.
    pub fn take_summary(&mut self) -> Option<GameOverSummary> {
        self.last_summary.take()
    }

    /// Look up a live enemy by id
    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Remove a death effect by id. Returns false if it was already gone.
    pub fn remove_death_effect(&mut self, id: u32) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.id != id);
        self.effects.len() != before
    }

    /// Record kills as death effects and queue their expiry
    pub(crate) fn add_death_effects(&mut self, killed: &[Enemy], now: f64) {
        if killed.is_empty() {
            return;
        }
        self.effects.extend(killed.iter().map(|e| DeathEffect {
            id: e.id,
            pos: e.pos,
            created_at: now,
        }));
        self.schedule.push(
            now + self.tuning.death_effect_duration,
            ScheduledAction::ExpireDeathEffects {
                ids: killed.iter().map(|e| e.id).collect(),
            },
        );
    }
}
