use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::config::GameConfig;
use crate::game::Game;
use crate::input::Bindings;
use crate::platform;
use crate::terminal::TerminalRenderer;

/// Main application wrapper that owns the terminal, the input bindings and the game loop.
pub struct App {
    pub game: Game,
    renderer: TerminalRenderer,
    bindings: Bindings,
    loop_time: Duration,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let loop_time = config.tick_interval();
        let game = Game::new(config).context("Could not create game")?;

        let mut renderer = TerminalRenderer::new();
        renderer.init().context("Could not initialize terminal")?;

        let mut app = Self {
            game,
            renderer,
            bindings: Bindings::default(),
            loop_time,
        };

        // Initial draw
        if let Err(e) = app.game.draw(&mut app.renderer) {
            error!("Failed to draw game: {e}");
        }

        Ok(app)
    }

    /// Executes a single tick of the game loop with consistent timing.
    ///
    /// Drains pending input into the game, ticks once, draws the result and then
    /// sleeps for whatever is left of the tick interval.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let game_over = !self.game.state().is_playing();
        for command in self.bindings.poll_commands(game_over) {
            self.game.queue_command(command);
        }

        if self.game.tick() {
            return false;
        }

        if let Err(e) = self.game.draw(&mut self.renderer) {
            error!("Failed to draw game: {e}");
        }

        if start.elapsed() < self.loop_time {
            let time = self.loop_time.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time);
            }
        } else {
            warn!("Game loop behind schedule by: {:?}", start.elapsed() - self.loop_time);
        }

        true
    }

    /// Restores the terminal to its normal state.
    pub fn shutdown(&mut self) -> Result<()> {
        self.renderer.cleanup().context("Could not restore terminal")
    }
}
