use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{events::GameCommand, map::direction::Direction};

#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<KeyCode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(KeyCode::Up, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(KeyCode::Char('w'), GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(KeyCode::Down, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(KeyCode::Char('s'), GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(KeyCode::Left, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(KeyCode::Char('a'), GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(KeyCode::Right, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(KeyCode::Char('d'), GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert(KeyCode::Char('p'), GameCommand::TogglePause);
        key_bindings.insert(KeyCode::Char('r'), GameCommand::Restart);
        key_bindings.insert(KeyCode::Esc, GameCommand::Exit);
        key_bindings.insert(KeyCode::Char('q'), GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    /// The command bound to a key. Letters match regardless of case.
    pub fn command_for(&self, code: KeyCode) -> Option<GameCommand> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.key_bindings.get(&code).copied()
    }

    /// Translates one key event.
    ///
    /// Releases are ignored and Ctrl+C always exits. Once the game is over, an
    /// unbound key restarts it.
    pub fn translate(&self, key: KeyEvent, game_over: bool) -> Option<GameCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(GameCommand::Exit);
        }

        match self.command_for(key.code) {
            Some(command) => Some(command),
            None if game_over => Some(GameCommand::Restart),
            None => None,
        }
    }

    /// Drains every pending terminal event without blocking.
    pub fn poll_commands(&self, game_over: bool) -> SmallVec<[GameCommand; 4]> {
        let mut commands = SmallVec::new();

        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }

            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(command) = self.translate(key, game_over) {
                        debug!(?command, "Triggering command");
                        commands.push(command);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal event");
                    break;
                }
            }
        }

        commands
    }
}
