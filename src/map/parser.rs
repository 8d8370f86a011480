//! Map parsing functionality for converting raw board layouts into structured data.

use glam::UVec2;
use tracing::trace;

use crate::constants::{AdversaryVariant, MapTile};
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed as `tiles[row][col]`.
    pub tiles: Vec<Vec<MapTile>>,
    /// The board size in tiles (columns, rows).
    pub size: UVec2,
    /// The player's starting tile.
    pub player_start: UVec2,
    /// Adversary starting tiles, in reading order.
    pub adversary_starts: Vec<(UVec2, AdversaryVariant)>,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Characters with no meaning produce an empty tile, same as `O`.
    pub fn parse_character(c: char) -> MapTile {
        match c {
            'X' => MapTile::Wall,
            ' ' => MapTile::Pickup,
            'O' => MapTile::Empty,
            'P' => MapTile::PlayerStart,
            'b' => MapTile::AdversaryStart(AdversaryVariant::Blue),
            'o' => MapTile::AdversaryStart(AdversaryVariant::Orange),
            'p' => MapTile::AdversaryStart(AdversaryVariant::Pink),
            'r' => MapTile::AdversaryStart(AdversaryVariant::Red),
            other => {
                trace!(character = ?other, "Unknown map character treated as empty");
                MapTile::Empty
            }
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, if its rows are not all the same
    /// length, or if it does not contain exactly one player start.
    pub fn parse_board<S: AsRef<str>>(raw_board: &[S]) -> Result<ParsedMap, ParseError> {
        let width = match raw_board.first() {
            Some(row) => row.as_ref().chars().count(),
            None => return Err(ParseError::EmptyBoard),
        };
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(raw_board.len());
        let mut player_starts = Vec::new();
        let mut adversary_starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            let mut row = Vec::with_capacity(width);
            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character);
                let position = UVec2::new(x as u32, y as u32);
                match tile {
                    MapTile::PlayerStart => player_starts.push(position),
                    MapTile::AdversaryStart(variant) => adversary_starts.push((position, variant)),
                    _ => {}
                }
                row.push(tile);
            }
            tiles.push(row);
        }

        let player_start = match player_starts.as_slice() {
            [] => return Err(ParseError::MissingPlayerStart),
            [start] => *start,
            many => return Err(ParseError::MultiplePlayerStarts(many.len())),
        };

        Ok(ParsedMap {
            tiles,
            size: UVec2::new(width as u32, raw_board.len() as u32),
            player_start,
            adversary_starts,
        })
    }
}
