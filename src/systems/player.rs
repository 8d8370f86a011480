use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{info, trace};

use crate::{
    error::GameError,
    events::{GameCommand, GameEvent},
    map::builder::Map,
    systems::{
        collision::overlaps_any,
        components::{Bounds, Facing, GlobalState, PlayerControlled, SessionState},
        movement::{advance, try_turn, wrapped_horizontally, BufferedDirection, Velocity},
    },
};

/// Processes queued commands at the start of a tick.
///
/// Movement commands are buffered on the player and retried by
/// [`player_movement_system`] until the turn succeeds or a newer request replaces
/// them. The facing direction follows input immediately, even when the turn is
/// blocked. Restarts are handled by [`crate::systems::restart_system`].
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    session: Res<SessionState>,
    mut players: Query<(&mut BufferedDirection, &mut Facing), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match command {
            GameCommand::Exit => {
                info!("Exit requested");
                state.exit = true;
            }
            GameCommand::TogglePause => {
                // Once the game is over this restarts instead.
                if !session.is_playing() {
                    continue;
                }
                state.paused = !state.paused;
                info!("{}", if state.paused { "Paused" } else { "Unpaused" });
            }
            GameCommand::MovePlayer(direction) => {
                if !session.is_playing() || state.paused {
                    continue;
                }

                match players.single_mut() {
                    Ok((mut buffered_direction, mut facing)) => {
                        *buffered_direction = BufferedDirection::Some(*direction);
                        facing.0 = *direction;
                    }
                    Err(e) => {
                        errors.write(GameError::InvalidState(format!(
                            "No/multiple entities queried for player control: {e}"
                        )));
                    }
                }
            }
            GameCommand::Restart => {}
        }
    }
}

/// Moves the player one tick.
///
/// A buffered direction is tried first; it stays buffered while the turn would run
/// into a wall. The player then advances, and a move into a wall is rolled back.
/// Leaving the board sideways re-enters from the other edge unless a wall is
/// there, in which case the move is rolled back as well. A rolled back move with
/// nothing buffered stops the player.
pub fn player_movement_system(
    map: Res<Map>,
    mut players: Query<(&mut Bounds, &mut Velocity, &mut BufferedDirection), With<PlayerControlled>>,
) {
    let board_width = map.pixel_size().x;

    for (mut bounds, mut velocity, mut buffered_direction) in players.iter_mut() {
        if let BufferedDirection::Some(direction) = *buffered_direction {
            let already_moving = velocity.is_moving() && velocity.direction() == direction;
            if already_moving || try_turn(&bounds.0, &mut velocity, direction, &map.walls) {
                trace!(?direction, "Player turn committed");
                *buffered_direction = BufferedDirection::None;
            }
        }

        let previous = bounds.0;
        let mut moved = advance(&mut bounds.0, &velocity, |rect| overlaps_any(rect, &map.walls));
        if moved {
            let wrapped = wrapped_horizontally(&bounds.0, board_width);
            if overlaps_any(&wrapped, &map.walls) {
                trace!("Wrap target is walled off");
                bounds.0 = previous;
                moved = false;
            } else {
                bounds.0 = wrapped;
            }
        }

        if !moved && *buffered_direction == BufferedDirection::None {
            trace!(direction = ?velocity.direction(), "Player blocked, stopping");
            velocity.stop();
        }
    }
}
