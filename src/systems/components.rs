use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};

use crate::{
    constants::AdversaryVariant,
    map::direction::Direction,
    systems::{
        collision::Rect,
        movement::{BufferedDirection, Velocity},
    },
};

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A roaming adversary. The variant only selects a sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adversary {
    pub variant: AdversaryVariant,
}

/// A tag component for consumable pickups.
#[derive(Default, Component)]
pub struct Pickup;

/// Marks every entity that belongs to the currently loaded map, so a reload can
/// remove them all at once.
#[derive(Default, Component)]
pub struct LevelEntity;

/// The entity's current screen-space rectangle.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bounds(pub Rect);

/// The rectangle the entity returns to when positions are reset.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spawn(pub Rect);

/// The direction the player sprite faces. Follows input, not motion.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facing(pub Direction);

/// Whether an adversary was already touching the player on the previous tick.
///
/// A hit is only counted when this goes from false to true.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactLatch(pub bool);

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub bounds: Bounds,
    pub spawn: Spawn,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
    pub facing: Facing,
    pub level: LevelEntity,
}

#[derive(Bundle)]
pub struct AdversaryBundle {
    pub adversary: Adversary,
    pub bounds: Bounds,
    pub spawn: Spawn,
    pub velocity: Velocity,
    pub contact: ContactLatch,
    pub level: LevelEntity,
}

#[derive(Bundle)]
pub struct PickupBundle {
    pub pickup: Pickup,
    pub bounds: Bounds,
    pub level: LevelEntity,
}

/// Host-facing flags that are not part of the session rules.
#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    pub paused: bool,
}

/// The top-level session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// Score, lives and phase for the running session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
}

impl SessionState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Removes one life, moving to `GameOver` when none remain.
    ///
    /// Returns the number of lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
        self.lives
    }
}
