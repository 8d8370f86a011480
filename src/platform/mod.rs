//! Host platform helpers: timing, randomness and log setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::ThreadRng;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::error::{GameError, GameResult};
use crate::formatter::TickFormatter;

pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}

pub fn rng() -> ThreadRng {
    rand::rng()
}

/// Installs the global tracing subscriber, writing to `log_path`.
///
/// The terminal belongs to the renderer, so logs never go to stdout/stderr.
/// The filter is read from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(log_path: &Path) -> GameResult<()> {
    let file = File::create(log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(TickFormatter)
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::InvalidState(format!("Could not set global tracing subscriber: {e}")))
}
