//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::map::builder::Map;
use crate::systems::{
    adversary_contact_system, adversary_movement_system, error_system, initial_spawn_system, is_playing,
    level_clear_system, pickup_system, player_control_system, player_movement_system, restart_system, GlobalState,
    Renderer, SessionState, Snapshot,
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that move actors
    Update,
    /// Gameplay systems that respond to the new positions (contact, pickups, level clear)
    Respond,
}

/// The `Game` struct is the main entry point for the simulation.
///
/// It owns the world and the schedule that advances it by one tick. Input is
/// queued with [`Game::queue_command`] and consumed at the start of the next tick;
/// frames are produced with [`Game::draw`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a world from `config` and spawns the first level.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the layout does not parse.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        config.validate()?;
        let map = Map::new(&config)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);

        info!(
            width = map.size().x,
            height = map.size().y,
            walls = map.walls.len(),
            pickups = map.pickup_count(),
            adversaries = map.adversary_starts.len(),
            "Map loaded"
        );

        world.insert_resource(SessionState::new(config.starting_lives));
        world.insert_resource(GlobalState::default());
        world.insert_resource(map);
        world.insert_resource(config);

        world
            .run_system_once(initial_spawn_system)
            .map_err(|e| GameError::InvalidState(format!("Initial spawn failed: {e}")))?;

        Self::configure_schedule(&mut schedule);

        Ok(Game { world, schedule })
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (player_control_system, restart_system).chain().in_set(GameplaySet::Input),
                (player_movement_system, adversary_movement_system)
                    .chain()
                    .distributive_run_if(is_playing)
                    .in_set(GameplaySet::Update),
                // Each system re-checks the phase, so a fatal hit stops scoring within the same tick.
                (adversary_contact_system, pickup_system, level_clear_system)
                    .chain()
                    .distributive_run_if(is_playing)
                    .in_set(GameplaySet::Respond),
                error_system.after(GameplaySet::Respond),
            ))
            .configure_sets((GameplaySet::Input, GameplaySet::Update, GameplaySet::Respond).chain());
    }

    /// Queues a command for the next tick.
    pub fn queue_command(&mut self, command: GameCommand) {
        debug!(?command, "Command queued");
        self.world.send_event(GameEvent::Command(command));
    }

    /// Ticks the game state.
    ///
    /// Returns true if the game should exit.
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);

        if let Some(mut events) = self.world.get_resource_mut::<Events<GameEvent>>() {
            events.update();
        }
        if let Some(mut errors) = self.world.get_resource_mut::<Events<GameError>>() {
            errors.update();
        }
        formatter::increment_tick();

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    /// Copies the drawable state of the world.
    pub fn snapshot(&mut self) -> GameResult<Snapshot> {
        Snapshot::capture(&mut self.world)
    }

    /// Hands the current frame to `renderer`.
    pub fn draw(&mut self, renderer: &mut impl Renderer) -> GameResult<()> {
        let snapshot = self.snapshot()?;
        renderer.render(&snapshot)
    }

    pub fn state(&self) -> &SessionState {
        self.world.resource::<SessionState>()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn map(&self) -> &Map {
        self.world.resource::<Map>()
    }

    pub fn is_paused(&self) -> bool {
        self.world.get_resource::<GlobalState>().is_some_and(|state| state.paused)
    }
}
