//! Centralized error types for the game.
//!
//! The simulation core has no I/O failure surface: errors are either load-time
//! rejections (bad map, bad config) or invariant violations reported by systems.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is also registered as an ECS event so that systems can report
/// invariant violations without panicking mid-tick.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Board has no rows")]
    EmptyBoard,
    #[error("Row {row} has length {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board has no player start position")]
    MissingPlayerStart,
    #[error("Board has {0} player start positions, expected exactly one")]
    MultiplePlayerStarts(usize),
}

/// Errors raised while loading the optional configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
