use bevy_ecs::prelude::*;

use crate::map::direction::Direction;

/// A discrete request coming from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    TogglePause,
    /// Explicit restart. Any other command also restarts once the game is over.
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The player consumed a pickup.
    PickupConsumed,
    /// An adversary touched the player.
    PlayerHit { lives_left: u32 },
    /// Every pickup was consumed and the map was reloaded.
    LevelCleared,
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
