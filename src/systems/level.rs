//! Spawning and reloading the entities of a map.

use bevy_ecs::{
    entity::Entity,
    system::{Commands, Res},
};
use tracing::debug;

use crate::{
    config::GameConfig,
    map::{builder::Map, direction::Direction},
    platform,
    systems::{
        components::{
            Adversary, AdversaryBundle, Bounds, ContactLatch, Facing, LevelEntity, Pickup, PickupBundle, PlayerBundle,
            PlayerControlled, Spawn,
        },
        movement::{turn_randomly, BufferedDirection, Velocity},
    },
};

/// Spawns the player, every adversary and every pickup of `map`.
///
/// Actors start idle, facing right. Adversaries then draw a random direction,
/// which is only taken if it does not face a wall.
pub fn spawn_level(commands: &mut Commands, map: &Map, config: &GameConfig) {
    let speed = config.speed();
    let player_spawn = map.player_spawn();

    commands.spawn(PlayerBundle {
        player: PlayerControlled,
        bounds: Bounds(player_spawn),
        spawn: Spawn(player_spawn),
        velocity: Velocity::idle(Direction::Right, speed),
        buffered_direction: BufferedDirection::None,
        facing: Facing(Direction::Right),
        level: LevelEntity,
    });

    let mut rng = platform::rng();
    for (rect, variant) in map.adversary_spawns() {
        let mut velocity = Velocity::idle(Direction::Right, speed);
        turn_randomly(&rect, &mut velocity, &map.walls, &mut rng);

        commands.spawn(AdversaryBundle {
            adversary: Adversary { variant },
            bounds: Bounds(rect),
            spawn: Spawn(rect),
            velocity,
            contact: ContactLatch(false),
            level: LevelEntity,
        });
    }

    let pickups: Vec<PickupBundle> = map
        .pickup_rects()
        .into_iter()
        .map(|rect| PickupBundle {
            pickup: Pickup,
            bounds: Bounds(rect),
            level: LevelEntity,
        })
        .collect();
    let pickup_count = pickups.len();
    commands.spawn_batch(pickups);

    debug!(
        adversaries = map.adversary_starts.len(),
        pickups = pickup_count,
        "Level spawned"
    );
}

/// Despawns every level entity and loads the map again from scratch.
pub fn reload_level(
    commands: &mut Commands,
    map: &mut Map,
    config: &GameConfig,
    level_entities: impl IntoIterator<Item = Entity>,
) {
    for entity in level_entities {
        commands.entity(entity).despawn();
    }
    map.rebuild_walls();
    spawn_level(commands, map, config);
}

/// Spawns the first level. Run once when the game is created.
pub fn initial_spawn_system(mut commands: Commands, map: Res<Map>, config: Res<GameConfig>) {
    spawn_level(&mut commands, &map, &config);
}
