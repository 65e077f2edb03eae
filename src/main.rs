//! Zombie Blade entry point
//!
//! Native builds run a headless session: the simulation is driven by a fixed
//! timestep loop, the final result goes onto the file-backed leaderboard.
//! The browser build is driven from JavaScript through `zombie_blade::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use zombie_blade::consts::*;
    use zombie_blade::platform::FileStore;
    use zombie_blade::sim::{GamePhase, GameState, TickInput, tick};
    use zombie_blade::{HighScores, Tuning};

    /// Headless wave-survival session
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds before the session is called
        #[arg(long, default_value_t = 300.0)]
        seconds: f64,
        /// Simulated frame length in seconds (the sim substeps at a fixed rate)
        #[arg(long, default_value_t = 1.0 / 60.0, value_parser = parse_frame_dt)]
        frame_dt: f32,
        /// JSON file overriding arena/combat tuning
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Directory holding the leaderboard
        #[arg(long, default_value = ".zombie-blade")]
        data_dir: PathBuf,
        /// Name to record on the leaderboard
        #[arg(long)]
        name: Option<String>,
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    /// A frame must move the clock forward, or the session never ends
    fn parse_frame_dt(s: &str) -> Result<f32, String> {
        let dt: f32 = s.parse().map_err(|e| format!("{e}"))?;
        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(format!("frame length must be a positive number of seconds, got {s}"))
        }
    }

    /// Session driver: turns frame deltas into fixed simulation steps
    struct Game {
        state: GameState,
        accumulator: f32,
        elapsed: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                accumulator: 0.0,
                elapsed: 0.0,
            }
        }

        /// Run simulation ticks for one frame
        fn update(&mut self, frame_dt: f32) {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.elapsed += SIM_DT as f64;
                let report = tick(&mut self.state, &TickInput::new(self.elapsed, SIM_DT));
                if report.damage > 0 {
                    log::info!("Player hit, health {}", self.state.player.health);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        zombie_blade::logging::init(args.verbose);

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        log::info!("Zombie Blade (headless) starting, seed {seed}");
        let mut game = Game::new(seed, tuning);
        game.state.start_game(0.0);

        while game.state.phase == GamePhase::Playing && game.elapsed < args.seconds {
            game.update(args.frame_dt);
        }
        if game.state.phase == GamePhase::Playing {
            log::info!("Time limit reached after {:.1}s", game.elapsed);
            game.state.end_game();
        }

        let summary = game
            .state
            .take_summary()
            .context("session ended without a summary")?;
        println!(
            "Final score {} | round {} | kills {}",
            summary.score, summary.round, summary.kills
        );

        let mut store = FileStore::new(&args.data_dir);
        let mut highscores = HighScores::load(&store);
        if let Some(name) = &args.name {
            match highscores.add_score(name, summary.score, summary.round) {
                Some(rank) => {
                    highscores
                        .save(&mut store)
                        .with_context(|| format!("saving leaderboard to {}", store.dir().display()))?;
                    println!("New high score! Rank #{rank}");
                }
                None => println!("No leaderboard entry for {name:?}"),
            }
        }

        println!("\n  #  NAME      SCORE  ROUND");
        for (i, entry) in highscores.entries.iter().enumerate() {
            println!(
                "{:>3}  {:<8} {:>6}  {:>5}",
                i + 1,
                entry.name,
                entry.score,
                entry.round
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `zombie_blade::web::WebGame`, this is just to satisfy the compiler
}
