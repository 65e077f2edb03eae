//! Spawn scheduling
//!
//! At most one enemy per tick, placed on a ring just inside the arena wall.

use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Enemy, GameState};
use crate::ground_point;

/// Spawn one enemy if the round still needs enemies and the spawn interval
/// has passed. Returns the new enemy's id.
pub fn maybe_spawn(state: &mut GameState, now: f64) -> Option<u32> {
    let params = state.round.params();
    if state.round.spawned >= state.round.target {
        return None;
    }
    if now - state.round.last_spawn_at <= params.spawn_interval {
        return None;
    }

    let tuning = &state.tuning;
    let theta = state.rng.random_range(0.0..TAU);
    let dist = tuning.spawn_ring_min + state.rng.random::<f32>() * tuning.spawn_ring_band;
    let factor = tuning.speed_variance_min
        + state.rng.random::<f32>() * (tuning.speed_variance_max - tuning.speed_variance_min);

    let id = state.next_entity_id();
    let enemy = Enemy::new(
        id,
        ground_point(dist, theta),
        params.enemy_speed * factor,
        params.enemy_health,
    );
    log::debug!(
        "Spawned enemy {} at r={:.2} speed={:.2} hp={} ({}/{})",
        id,
        dist,
        enemy.speed,
        enemy.health,
        state.round.spawned + 1,
        state.round.target
    );

    state.enemies.push(enemy);
    state.round.spawned += 1;
    state.round.last_spawn_at = now;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_distance;
    use glam::Vec3;
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_game(0.0);
        state
    }

    #[test]
    fn waits_for_interval() {
        let mut state = playing(1);
        // Round 1 interval is 1.9s, and the gap must strictly exceed it
        assert_eq!(maybe_spawn(&mut state, 1.0), None);
        assert_eq!(maybe_spawn(&mut state, 1.9), None);
        assert!(maybe_spawn(&mut state, 1.95).is_some());
        assert_eq!(state.round.spawned, 1);
        assert_eq!(maybe_spawn(&mut state, 2.0), None);
    }

    #[test]
    fn spawns_on_outer_ring_with_round_stats() {
        let mut state = playing(42);
        let mut now = 0.0;
        for _ in 0..5 {
            now += 2.0;
            maybe_spawn(&mut state, now);
        }
        assert_eq!(state.enemies.len(), 5);
        for e in &state.enemies {
            let d = ground_distance(Vec3::ZERO, e.pos);
            assert!((13.0..=15.0 + 1e-4).contains(&d), "spawned at {d}");
            assert_eq!(e.pos.y, 0.0);
            assert!(e.speed >= 1.8 * 0.8 - 1e-4 && e.speed <= 1.8 * 1.2 + 1e-4);
            assert_eq!(e.health, 1);
        }
    }

    #[test]
    fn no_catch_up_burst() {
        let mut state = playing(3);
        // A huge gap still yields a single enemy
        assert!(maybe_spawn(&mut state, 1000.0).is_some());
        assert_eq!(maybe_spawn(&mut state, 1000.0), None);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn stops_at_target() {
        let mut state = playing(5);
        let mut now = 0.0;
        for _ in 0..50 {
            now += 5.0;
            maybe_spawn(&mut state, now);
        }
        assert_eq!(state.round.spawned, state.round.target);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn ids_are_unique() {
        let mut state = playing(9);
        let mut now = 0.0;
        let mut ids = Vec::new();
        for _ in 0..5 {
            now += 2.0;
            ids.extend(maybe_spawn(&mut state, now));
        }
        let mut sorted = ids.clone();
        sorted.dedup();
        assert_eq!(sorted, ids);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn never_exceeds_target_or_one_per_tick(
            seed in any::<u64>(),
            round in 1u32..20,
            steps in proptest::collection::vec(0.0f64..3.0, 1..200),
        ) {
            let mut state = playing(seed);
            state.round = crate::sim::round::RoundState::start(round, 0.0);
            let mut now = 0.0;
            for dt in steps {
                now += dt;
                let before = state.enemies.len();
                maybe_spawn(&mut state, now);
                prop_assert!(state.enemies.len() - before <= 1);
                prop_assert!(state.round.spawned <= state.round.target);
            }
        }
    }
}
