//! Game tunables and the optional TOML configuration file.
//!
//! Every key is optional; anything missing falls back to the defaults in
//! [`crate::constants`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy_ecs::resource::Resource;
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::{PICKUP_POINTS, PICKUP_SIZE, RAW_BOARD, SPEED_FRACTION, STARTING_LIVES, TICK_RATE, TILE_SIZE};
use crate::error::ConfigError;

/// Resolved game configuration.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Side length of a tile, in pixels.
    pub tile_size: f32,
    /// Movement per tick as a fraction of `tile_size`.
    pub speed_fraction: f32,
    /// Side length of a pickup, in pixels.
    pub pickup_size: f32,
    pub starting_lives: u32,
    pub pickup_points: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Maze rows.
    pub layout: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            speed_fraction: SPEED_FRACTION,
            pickup_size: PICKUP_SIZE,
            starting_lives: STARTING_LIVES,
            pickup_points: PICKUP_POINTS,
            tick_rate: TICK_RATE,
            layout: RAW_BOARD.iter().map(|row| row.to_string()).collect(),
        }
    }
}

impl GameConfig {
    /// Movement per tick, in pixels.
    pub fn speed(&self) -> f32 {
        self.tile_size * self.speed_fraction
    }

    /// Duration of one simulation tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Replaces the layout with the given rows.
    pub fn with_layout<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.layout = rows.iter().map(|row| row.as_ref().to_string()).collect();
        self
    }

    /// Loads configuration from `path`, or returns the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::from_toml(&text, base_dir)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses a TOML document. A relative `map_file` is resolved against `base_dir`.
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: TomlConfig = toml::from_str(text)?;
        let defaults = Self::default();

        let layout = match raw.map_file {
            Some(map_file) => {
                let map_path = if map_file.is_absolute() {
                    map_file
                } else {
                    base_dir.join(map_file)
                };
                let text = std::fs::read_to_string(&map_path).map_err(|source| ConfigError::Read {
                    path: map_path.display().to_string(),
                    source,
                })?;
                text.lines()
                    .map(|line| line.trim_end_matches('\r').to_string())
                    .filter(|line| !line.is_empty())
                    .collect()
            }
            None => defaults.layout,
        };

        let config = Self {
            tile_size: raw.tile_size.unwrap_or(defaults.tile_size),
            speed_fraction: raw.speed_fraction.unwrap_or(defaults.speed_fraction),
            pickup_size: raw.pickup_size.unwrap_or(defaults.pickup_size),
            starting_lives: raw.starting_lives.unwrap_or(defaults.starting_lives),
            pickup_points: raw.pickup_points.unwrap_or(defaults.pickup_points),
            tick_rate: raw.tick_rate.unwrap_or(defaults.tick_rate),
            layout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "tile_size",
                reason: format!("must be positive, got {}", self.tile_size),
            });
        }
        if !(self.speed_fraction > 0.0 && self.speed_fraction < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "speed_fraction",
                reason: format!("must be between 0 and 1, got {}", self.speed_fraction),
            });
        }
        let steps_per_tile = 1.0 / self.speed_fraction;
        if (steps_per_tile - steps_per_tile.round()).abs() > 1e-4 {
            return Err(ConfigError::InvalidValue {
                key: "speed_fraction",
                reason: format!(
                    "must split a tile into a whole number of steps, got {} ({} px per tick)",
                    self.speed_fraction,
                    self.speed()
                ),
            });
        }
        if !(self.pickup_size > 0.0 && self.pickup_size <= self.tile_size) {
            return Err(ConfigError::InvalidValue {
                key: "pickup_size",
                reason: format!("must be positive and fit in a tile, got {}", self.pickup_size),
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::InvalidValue {
                key: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    tile_size: Option<f32>,
    speed_fraction: Option<f32>,
    pickup_size: Option<f32>,
    starting_lives: Option<u32>,
    pickup_points: Option<u32>,
    tick_rate: Option<u32>,
    map_file: Option<PathBuf>,
}
