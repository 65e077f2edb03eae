//! Browser bridge
//!
//! The 3D scene, HUD and menus live in JavaScript. This wrapper gives them
//! the simulation: the page calls `tick` once per animation frame and draws
//! whatever `snapshot_json` returns.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::platform::LocalStore;
use crate::sim::{GamePhase, GameState, RenderSnapshot, TickInput, tick};

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    highscores: HighScores,
    store: LocalStore,
    /// Phase seen on the previous tick, to spot the game-over edge
    last_phase: GamePhase,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        crate::logging::init(false);
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        let store = LocalStore;
        let highscores = HighScores::load(&store);
        log::info!("Zombie Blade starting (seed {seed})");
        WebGame {
            state: GameState::new(seed),
            highscores,
            store,
            last_phase: GamePhase::Menu,
        }
    }

    /// Begin a fresh run (also used for restart)
    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self, elapsed: f64) {
        self.state.start_game(elapsed);
        self.last_phase = self.state.phase;
    }

    #[wasm_bindgen(js_name = goToMenu)]
    pub fn go_to_menu(&mut self) {
        self.state.go_to_menu();
        self.highscores = HighScores::load(&self.store);
        self.last_phase = self.state.phase;
    }

    /// Advance one frame. Returns true on the frame the run ends.
    pub fn tick(&mut self, elapsed: f64, dt: f32) -> bool {
        let dt = dt.clamp(0.0, crate::consts::MAX_FRAME_DT);
        tick(&mut self.state, &TickInput::new(elapsed, dt));
        let ended = self.last_phase == GamePhase::Playing && self.state.phase == GamePhase::GameOver;
        self.last_phase = self.state.phase;
        ended
    }

    /// Current frame as JSON (see `RenderSnapshot`)
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&RenderSnapshot::capture(&self.state)).unwrap_or_default()
    }

    /// Submit the finished run under `name`. Returns the rank (1-based) or 0.
    #[wasm_bindgen(js_name = submitScore)]
    pub fn submit_score(&mut self, name: &str) -> u32 {
        // One entry per finished run, however often the page calls this.
        // A rejected name keeps the run available for another try.
        if crate::highscores::normalize_name(name).is_none() {
            return 0;
        }
        let Some(summary) = self.state.take_summary() else {
            return 0;
        };
        let Some(rank) = self.highscores.add_score(name, summary.score, summary.round) else {
            return 0;
        };
        if let Err(e) = self.highscores.save(&mut self.store) {
            log::warn!("Failed to save high scores: {e}");
        }
        rank as u32
    }

    /// Leaderboard as JSON
    #[wasm_bindgen(js_name = highScoresJson)]
    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.highscores).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
