//! Logger setup
//!
//! Native builds log through `env_logger` (honours `RUST_LOG`), browser builds
//! through `console_log`.

use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages (spawns, kills) are printed.
/// Otherwise only info level and above are shown.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(verbose: bool) {
    use env_logger::{Builder, Env};

    let env = Env::default().default_filter_or(level(verbose).to_string());
    // `try_init` only fails if a logger was already set; tests may call this repeatedly.
    let _ = Builder::from_env(env).try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init(verbose: bool) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(level(verbose).to_level().unwrap_or(log::Level::Info));
}

fn level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
        assert_eq!(level(true), LevelFilter::Debug);
        assert_eq!(level(false), LevelFilter::Info);
    }
}
