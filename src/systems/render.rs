//! Read-only views of the world for drawing collaborators.

use bevy_ecs::query::With;
use bevy_ecs::world::World;
use glam::{UVec2, Vec2};

use crate::constants::AdversaryVariant;
use crate::error::{GameError, GameResult};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::collision::Rect;
use crate::systems::components::{Adversary, Bounds, Facing, GamePhase, Pickup, PlayerControlled, SessionState};
use crate::systems::movement::{MovementState, Velocity};

/// Anything that can present a frame.
///
/// Called once after every tick. The game never inspects the drawn output; a
/// returned error is only logged.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> GameResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub rect: Rect,
    /// Where the sprite looks. Follows input, which can differ from `movement`.
    pub facing: Direction,
    pub movement: MovementState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdversaryView {
    pub rect: Rect,
    pub variant: AdversaryVariant,
    pub movement: MovementState,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: PlayerView,
    pub adversaries: Vec<AdversaryView>,
    pub walls: Vec<Rect>,
    pub pickups: Vec<Rect>,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Board size, in tiles.
    pub board_size: UVec2,
    pub tile_size: f32,
}

impl Snapshot {
    /// Copies the drawable state out of the world.
    ///
    /// # Errors
    ///
    /// Returns an error if there is not exactly one player, or if the map or session
    /// resources are missing.
    pub fn capture(world: &mut World) -> GameResult<Snapshot> {
        let mut players = world.query_filtered::<(&Bounds, &Facing, &Velocity), With<PlayerControlled>>();
        let player = players
            .single(world)
            .map(|(bounds, facing, velocity)| PlayerView {
                rect: bounds.0,
                facing: facing.0,
                movement: velocity.state(),
            })
            .map_err(|e| GameError::InvalidState(format!("No/multiple entities queried for snapshot: {e}")))?;

        let mut adversary_query = world.query::<(&Adversary, &Bounds, &Velocity)>();
        let adversaries = adversary_query
            .iter(world)
            .map(|(adversary, bounds, velocity)| AdversaryView {
                rect: bounds.0,
                variant: adversary.variant,
                movement: velocity.state(),
            })
            .collect();

        let mut pickup_query = world.query_filtered::<&Bounds, With<Pickup>>();
        let pickups = pickup_query.iter(world).map(|bounds| bounds.0).collect();

        let map = world
            .get_resource::<Map>()
            .ok_or_else(|| GameError::InvalidState("Map resource missing".to_string()))?;
        let session = world
            .get_resource::<SessionState>()
            .ok_or_else(|| GameError::InvalidState("SessionState resource missing".to_string()))?;

        Ok(Snapshot {
            player,
            adversaries,
            walls: map.walls.clone(),
            pickups,
            score: session.score,
            lives: session.lives,
            phase: session.phase,
            board_size: map.size(),
            tile_size: map.tile_size(),
        })
    }

    /// The status line: lives and score while playing, the final score once over.
    pub fn hud_text(&self) -> String {
        match self.phase {
            GamePhase::Playing => format!("Lives: {}  Score: {}", self.lives, self.score),
            GamePhase::GameOver => format!("Game Over: {}", self.score),
        }
    }

    /// Board size, in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        self.board_size.as_vec2() * self.tile_size
    }
}
