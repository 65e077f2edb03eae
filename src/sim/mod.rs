//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through [`TickInput`], never from a wall clock
//! - Seeded RNG only
//! - Stable iteration order (enemies stay in ascending id order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod round;
pub mod schedule;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{Contact, Resolution, classify, resolve};
pub use round::{RoundDirector, RoundParams, RoundPhase, RoundState};
pub use schedule::{Schedule, ScheduledAction};
pub use snapshot::RenderSnapshot;
pub use state::{
    DeathEffect, Enemy, GameOverSummary, GamePhase, GameState, HealthBand, PlayerStats,
};
pub use tick::{PLAYER_POSITION, TickInput, TickReport, tick};
