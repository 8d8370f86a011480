use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res},
};
use tracing::trace;

use crate::{
    map::builder::Map,
    platform,
    systems::{
        collision::overlaps_any,
        components::{Adversary, Bounds, PlayerControlled},
        movement::{advance, outside_horizontal_bounds, turn_randomly, Velocity},
    },
};

/// Randomized adversary movement.
///
/// Each adversary keeps going straight until a move would hit a wall or leave the
/// board horizontally. That move is undone and a new direction is drawn uniformly
/// from all four (the current one included). A draw that faces a wall is rejected
/// like any other turn, so the adversary simply tries again next tick.
///
/// Adversaries that are idle, because no spawn-time draw succeeded yet, draw a
/// new direction every tick.
pub fn adversary_movement_system(
    map: Res<Map>,
    mut adversaries: Query<(&Adversary, &mut Bounds, &mut Velocity), (With<Adversary>, Without<PlayerControlled>)>,
) {
    let mut rng = platform::rng();
    let board_width = map.pixel_size().x;

    for (adversary, mut bounds, mut velocity) in adversaries.iter_mut() {
        if !velocity.is_moving() {
            turn_randomly(&bounds.0, &mut velocity, &map.walls, &mut rng);
        }

        let moved = advance(&mut bounds.0, &velocity, |rect| {
            overlaps_any(rect, &map.walls) || outside_horizontal_bounds(rect, board_width)
        });

        if !moved {
            let turned = turn_randomly(&bounds.0, &mut velocity, &map.walls, &mut rng);
            trace!(
                variant = adversary.variant.as_ref(),
                direction = ?velocity.direction(),
                turned,
                "Adversary blocked, redrawing direction"
            );
        }
    }
}
