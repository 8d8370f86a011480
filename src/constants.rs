//! This module contains all the constants used in the game.

/// The number of simulation ticks per second.
pub const TICK_RATE: u32 = 60;

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 32.0;

/// How far an actor moves per tick, as a fraction of the tile size.
pub const SPEED_FRACTION: f32 = 1.0 / 8.0;

/// The side length of a pickup, in pixels. Pickups are centered in their tile.
pub const PICKUP_SIZE: f32 = 4.0;

/// The number of lives a fresh session starts with.
pub const STARTING_LIVES: u32 = 3;

/// Points awarded for each pickup consumed.
pub const PICKUP_POINTS: u32 = 10;

/// The size of the reference board, in tiles (columns, rows).
pub const BOARD_TILE_SIZE: (usize, usize) = (19, 21);

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// Open space with nothing on it.
    Empty,
    /// A wall tile.
    Wall,
    /// Open space holding a pickup.
    Pickup,
    /// The player's spawn tile.
    PlayerStart,
    /// An adversary's spawn tile.
    AdversaryStart(AdversaryVariant),
}

/// Adversary variants. These only select a sprite; every variant moves the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::AsRefStr, strum_macros::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AdversaryVariant {
    Blue,
    Orange,
    Pink,
    Red,
}

/// The raw layout of the reference board, as rows of characters.
///
/// `X` wall, `O` void, ` ` pickup, `P` player spawn, `b`/`o`/`p`/`r` adversary spawns.
pub const RAW_BOARD: [&str; BOARD_TILE_SIZE.1] = [
    "XXXXXXXXXXXXXXXXXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X                 X",
    "X XX X XXXXX X XX X",
    "X    X       X    X",
    "XXXX XXXX XXXX XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXrXX X XXXX",
    "O       bpo       O",
    "XXXX X XXXXX X XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXXXX X XXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X  X     P     X  X",
    "XX X X XXXXX X X XX",
    "X    X   X   X    X",
    "X XXXXXX X XXXXXX X",
    "X                 X",
    "XXXXXXXXXXXXXXXXXXX",
];
