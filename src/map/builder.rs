//! Map construction: turns a parsed layout into screen-space geometry.

use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};
use tracing::debug;

use crate::config::GameConfig;
use crate::constants::{AdversaryVariant, MapTile};
use crate::error::GameResult;
use crate::map::parser::{MapTileParser, ParsedMap};
use crate::systems::collision::Rect;

/// The main map structure: the immutable tile grid plus the static wall set.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    /// The raw tile data for the map, indexed as `tiles[row][col]`.
    tiles: Vec<Vec<MapTile>>,
    /// The board size, in tiles.
    size: UVec2,
    tile_size: f32,
    pickup_size: f32,
    /// Every wall tile as a rectangle. Rebuilt wholesale on each load.
    pub walls: Vec<Rect>,
    pub player_start: UVec2,
    pub adversary_starts: Vec<(UVec2, AdversaryVariant)>,
}

impl Map {
    /// Creates a new `Map` from the configured layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, ragged, or does not contain exactly
    /// one player start.
    pub fn new(config: &GameConfig) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(&config.layout)?;
        Ok(Self::from_parsed(parsed, config.tile_size, config.pickup_size))
    }

    pub fn from_parsed(parsed: ParsedMap, tile_size: f32, pickup_size: f32) -> Map {
        let ParsedMap {
            tiles,
            size,
            player_start,
            adversary_starts,
        } = parsed;

        let mut map = Map {
            tiles,
            size,
            tile_size,
            pickup_size,
            walls: Vec::new(),
            player_start,
            adversary_starts,
        };
        map.rebuild_walls();
        map
    }

    /// Replaces the wall set with a freshly generated one.
    pub fn rebuild_walls(&mut self) {
        let walls: Vec<Rect> = self
            .iter_tiles()
            .filter(|(_, tile)| *tile == MapTile::Wall)
            .map(|(position, _)| self.tile_rect(position))
            .collect();
        debug!(walls = walls.len(), "Wall set built");
        self.walls = walls;
    }

    /// Iterates over every tile with its grid position, in reading order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (UVec2, MapTile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| (UVec2::new(x as u32, y as u32), *tile))
        })
    }

    /// Returns the tile at the given grid position, if it is on the board.
    #[cfg(test)]
    fn tile_at(&self, position: UVec2) -> Option<MapTile> {
        self.tiles
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    /// The screen-space rectangle covering a tile.
    pub fn tile_rect(&self, position: UVec2) -> Rect {
        Rect {
            pos: position.as_vec2() * self.tile_size,
            size: Vec2::splat(self.tile_size),
        }
    }

    /// Pickup rectangles for every pickup tile, centered in the tile.
    pub fn pickup_rects(&self) -> Vec<Rect> {
        let offset = Vec2::splat((self.tile_size - self.pickup_size) / 2.0);
        self.iter_tiles()
            .filter(|(_, tile)| *tile == MapTile::Pickup)
            .map(|(position, _)| Rect {
                pos: position.as_vec2() * self.tile_size + offset,
                size: Vec2::splat(self.pickup_size),
            })
            .collect()
    }

    /// How many pickups a fresh load of this map spawns.
    pub fn pickup_count(&self) -> usize {
        self.iter_tiles().filter(|(_, tile)| *tile == MapTile::Pickup).count()
    }

    pub fn player_spawn(&self) -> Rect {
        self.tile_rect(self.player_start)
    }

    pub fn adversary_spawns(&self) -> impl Iterator<Item = (Rect, AdversaryVariant)> + '_ {
        self.adversary_starts
            .iter()
            .map(|(position, variant)| (self.tile_rect(*position), *variant))
    }

    /// The board size, in tiles.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The board size, in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        self.size.as_vec2() * self.tile_size
    }
}
