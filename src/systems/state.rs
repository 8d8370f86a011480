//! Score, lives and phase transitions.

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use tracing::{error, info};

use crate::{
    config::GameConfig,
    error::GameError,
    events::{GameCommand, GameEvent},
    map::builder::Map,
    platform,
    systems::{
        collision::overlaps,
        components::{
            Adversary, Bounds, ContactLatch, GlobalState, LevelEntity, Pickup, PlayerControlled, SessionState, Spawn,
        },
        level::reload_level,
        movement::{turn_randomly, BufferedDirection, Velocity},
    },
};

/// Run condition for everything that moves or scores.
pub fn is_playing(session: Res<SessionState>, state: Res<GlobalState>) -> bool {
    session.is_playing() && !state.paused
}

/// Counts adversary hits on the player.
///
/// Only the tick on which an adversary starts touching the player counts, and at
/// most one life is lost per tick. A fatal hit ends the session and leaves every
/// actor where it is; otherwise all actors return to their spawns.
#[allow(clippy::type_complexity)]
pub fn adversary_contact_system(
    mut session: ResMut<SessionState>,
    map: Res<Map>,
    mut players: Query<
        (&mut Bounds, &Spawn, &mut Velocity, &mut BufferedDirection),
        (With<PlayerControlled>, Without<Adversary>),
    >,
    mut adversaries: Query<(&mut Bounds, &Spawn, &mut Velocity, &mut ContactLatch), (With<Adversary>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let (mut player_bounds, player_spawn, mut player_velocity, mut buffered_direction) = match players.single_mut() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for contact system: {e}"
            )));
            return;
        }
    };

    let mut hit = false;
    for (bounds, _, _, mut latch) in adversaries.iter_mut() {
        let touching = overlaps(&bounds.0, &player_bounds.0);
        if touching && !latch.0 {
            hit = true;
        }
        latch.0 = touching;
    }

    if !hit {
        return;
    }

    let lives_left = session.lose_life();
    events.write(GameEvent::PlayerHit { lives_left });

    if lives_left == 0 {
        info!(score = session.score, "Game over");
        return;
    }

    info!(lives_left, "Player hit, resetting positions");

    player_bounds.0 = player_spawn.0;
    player_velocity.stop();
    *buffered_direction = BufferedDirection::None;

    let mut rng = platform::rng();
    for (mut bounds, spawn, mut velocity, mut latch) in adversaries.iter_mut() {
        bounds.0 = spawn.0;
        turn_randomly(&bounds.0, &mut velocity, &map.walls, &mut rng);
        latch.0 = overlaps(&bounds.0, &player_bounds.0);
    }
}

/// Consumes the first pickup overlapping the player, if any.
pub fn pickup_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut session: ResMut<SessionState>,
    players: Query<&Bounds, With<PlayerControlled>>,
    pickups: Query<(Entity, &Bounds), With<Pickup>>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    let Some((entity, _)) = pickups.iter().find(|(_, bounds)| overlaps(&player.0, &bounds.0)) else {
        return;
    };

    commands.entity(entity).despawn();
    session.score += config.pickup_points;
    events.write(GameEvent::PickupConsumed);
}

/// Reloads the map once every pickup has been consumed.
///
/// Maps without any pickups are never considered cleared.
pub fn level_clear_system(
    mut commands: Commands,
    mut map: ResMut<Map>,
    config: Res<GameConfig>,
    pickups: Query<(), With<Pickup>>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut events: EventWriter<GameEvent>,
) {
    if !pickups.is_empty() || map.pickup_count() == 0 {
        return;
    }

    info!("Level cleared, reloading map");
    reload_level(&mut commands, &mut map, &config, level_entities.iter());
    events.write(GameEvent::LevelCleared);
}

/// Starts a new session on an explicit restart, or on any input but `Exit` once the game is over.
///
/// A restart always leaves the game unpaused.
pub fn restart_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut session: ResMut<SessionState>,
    mut state: ResMut<GlobalState>,
    mut map: ResMut<Map>,
    config: Res<GameConfig>,
    level_entities: Query<Entity, With<LevelEntity>>,
) {
    let game_over = !session.is_playing();
    let requested = events.read().fold(false, |requested, event| {
        requested
            || match event {
                GameEvent::Command(GameCommand::Restart) => true,
                GameEvent::Command(GameCommand::MovePlayer(_) | GameCommand::TogglePause) => game_over,
                _ => false,
            }
    });

    if !requested {
        return;
    }

    info!(previous_score = session.score, "Restarting session");
    *session = SessionState::new(config.starting_lives);
    state.paused = false;
    reload_level(&mut commands, &mut map, &config, level_entities.iter());
}

/// Logs errors raised by other systems.
pub fn error_system(mut errors: EventReader<GameError>) {
    for e in errors.read() {
        error!(error = %e, "Error during tick");
    }
}
