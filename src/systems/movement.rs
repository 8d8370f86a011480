use bevy_ecs::component::Component;
use glam::Vec2;
use rand::Rng;

use crate::map::direction::Direction;
use crate::systems::collision::{overlaps_any, Rect};

/// Whether an actor is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    Idle,
    Moving(Direction),
}

/// An actor's direction and per-tick velocity.
///
/// The velocity is always derived from the direction, so it is either exactly the
/// direction's unit vector scaled by `speed`, or zero while idle.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    direction: Direction,
    speed: f32,
    moving: bool,
}

impl Velocity {
    pub fn idle(direction: Direction, speed: f32) -> Self {
        Self {
            direction,
            speed,
            moving: false,
        }
    }

    pub fn moving(direction: Direction, speed: f32) -> Self {
        Self {
            direction,
            speed,
            moving: true,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn state(&self) -> MovementState {
        if self.moving {
            MovementState::Moving(self.direction)
        } else {
            MovementState::Idle
        }
    }

    /// The per-tick displacement.
    pub fn delta(&self) -> Vec2 {
        if self.moving {
            self.direction.velocity(self.speed)
        } else {
            Vec2::ZERO
        }
    }

    /// Zeroes the velocity, keeping the direction.
    pub fn stop(&mut self) {
        self.moving = false;
    }
}

/// A direction the player asked for that could not be taken yet.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferedDirection {
    #[default]
    None,
    Some(Direction),
}

/// Attempts to turn an actor towards `requested`.
///
/// The turn is committed only if the actor, moved one step in the new direction,
/// would not overlap any wall. Otherwise the velocity is left untouched.
/// Returns whether the turn was committed.
pub fn try_turn(bounds: &Rect, velocity: &mut Velocity, requested: Direction, walls: &[Rect]) -> bool {
    let candidate = bounds.translated(requested.velocity(velocity.speed()));
    if overlaps_any(&candidate, walls) {
        return false;
    }
    *velocity = Velocity::moving(requested, velocity.speed());
    true
}

/// Picks one of the four directions uniformly (the current one included) and tries to turn towards it.
pub fn turn_randomly<R: Rng + ?Sized>(bounds: &Rect, velocity: &mut Velocity, walls: &[Rect], rng: &mut R) -> bool {
    let direction = Direction::DIRECTIONS[rng.random_range(0..Direction::DIRECTIONS.len())];
    try_turn(bounds, velocity, direction, walls)
}

/// Moves `bounds` by one tick of `velocity`, undoing the move if `blocked` rejects the result.
///
/// Returns false if the move was rolled back.
pub fn advance(bounds: &mut Rect, velocity: &Velocity, blocked: impl Fn(&Rect) -> bool) -> bool {
    let delta = velocity.delta();
    if delta == Vec2::ZERO {
        return true;
    }

    let previous = *bounds;
    *bounds = bounds.translated(delta);
    if blocked(bounds) {
        *bounds = previous;
        return false;
    }
    true
}

/// Whether the rectangle sticks out past the left or right edge of a board `board_width` pixels wide.
pub fn outside_horizontal_bounds(bounds: &Rect, board_width: f32) -> bool {
    bounds.x() < 0.0 || bounds.x() + bounds.width() > board_width
}

/// The rectangle re-entering from the opposite side once its center leaves the board horizontally.
pub fn wrapped_horizontally(bounds: &Rect, board_width: f32) -> Rect {
    let center = bounds.center().x;
    if center < 0.0 {
        bounds.translated(Vec2::new(board_width, 0.0))
    } else if center >= board_width {
        bounds.translated(Vec2::new(-board_width, 0.0))
    } else {
        *bounds
    }
}
