use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tilechase::{app::App, config::GameConfig, platform};
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "tilechase.toml";
const DEFAULT_LOG_PATH: &str = "tilechase.log";

/// Returns the value following `flag`, if present.
fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(PathBuf::from)
}

/// The main entry point of the application.
///
/// Sets up logging, loads the configuration and runs the game loop until the
/// player exits.
pub fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = flag_value(&args, "--config").unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let log_path = flag_value(&args, "--log").unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

    platform::init_logging(&log_path).context("Could not initialize logging")?;

    let config = GameConfig::load(&config_path)
        .with_context(|| format!("Could not load configuration from {}", config_path.display()))?;

    let mut app = App::new(config)?;
    info!(tick_interval = ?app.game.config().tick_interval(), "Starting game loop");

    while app.run() {}

    let final_score = app.game.state().score;
    app.shutdown()?;

    info!(final_score, "Exited");
    println!("Final score: {final_score}");
    Ok(())
}
