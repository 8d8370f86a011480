#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, query::With};
use tilechase::{
    config::GameConfig,
    events::GameEvent,
    game::Game,
    systems::{Adversary, Bounds, BufferedDirection, Facing, Pickup, PlayerControlled, Rect, Velocity},
};

pub fn config_with_layout(rows: &[&str]) -> GameConfig {
    GameConfig::default().with_layout(rows)
}

pub fn game_with_layout(rows: &[&str]) -> Game {
    Game::new(config_with_layout(rows)).expect("layout should build a game")
}

pub fn game_with_config(config: GameConfig) -> Game {
    Game::new(config).expect("config should build a game")
}

pub fn run_ticks(game: &mut Game, ticks: usize) {
    for _ in 0..ticks {
        game.tick();
    }
}

pub fn player(game: &mut Game) -> Entity {
    game.world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(&game.world)
        .expect("exactly one player")
}

pub fn player_bounds(game: &mut Game) -> Rect {
    let entity = player(game);
    game.world.get::<Bounds>(entity).expect("player has bounds").0
}

pub fn player_velocity(game: &mut Game) -> Velocity {
    let entity = player(game);
    *game.world.get::<Velocity>(entity).expect("player has velocity")
}

pub fn player_buffered_direction(game: &mut Game) -> BufferedDirection {
    let entity = player(game);
    *game.world.get::<BufferedDirection>(entity).expect("player has a direction buffer")
}

pub fn player_facing(game: &mut Game) -> Facing {
    let entity = player(game);
    *game.world.get::<Facing>(entity).expect("player has a facing")
}

pub fn adversaries(game: &mut Game) -> Vec<Entity> {
    game.world
        .query_filtered::<Entity, With<Adversary>>()
        .iter(&game.world)
        .collect()
}

pub fn pickup_count(game: &mut Game) -> usize {
    game.world
        .query_filtered::<(), With<Pickup>>()
        .iter(&game.world)
        .count()
}

pub fn set_bounds(game: &mut Game, entity: Entity, rect: Rect) {
    game.world.entity_mut(entity).insert(Bounds(rect));
}

pub fn set_velocity(game: &mut Game, entity: Entity, velocity: Velocity) {
    game.world.entity_mut(entity).insert(velocity);
}

/// Every game event still held in the event buffers.
pub fn game_events(game: &Game) -> Vec<GameEvent> {
    let events = game.world.resource::<Events<GameEvent>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).copied().collect()
}
