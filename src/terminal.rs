//! Terminal frontend: draws snapshots with crossterm.
//!
//! Every tile takes two terminal columns so the board keeps roughly square proportions.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use glam::Vec2;

use crate::constants::AdversaryVariant;
use crate::error::{GameError, GameResult};
use crate::map::direction::Direction;
use crate::systems::render::{Renderer, Snapshot};

const CELL_WIDTH: usize = 2;

const WALL: char = '█';
const PICKUP: char = '·';

fn player_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => 'v',
        Direction::Down => '^',
        Direction::Left => '>',
        Direction::Right => '<',
    }
}

fn adversary_glyph(variant: AdversaryVariant) -> char {
    match variant {
        AdversaryVariant::Blue => 'B',
        AdversaryVariant::Orange => 'O',
        AdversaryVariant::Pink => 'P',
        AdversaryVariant::Red => 'R',
    }
}

fn glyph_color(glyph: char) -> Color {
    match glyph {
        WALL => Color::DarkBlue,
        'v' | '^' | '>' | '<' => Color::Yellow,
        'B' => Color::Cyan,
        'O' => Color::DarkYellow,
        'P' => Color::Magenta,
        'R' => Color::Red,
        _ => Color::White,
    }
}

/// The board cell containing `point`, clamped to the board.
fn cell_of(snapshot: &Snapshot, point: Vec2) -> (usize, usize) {
    let size = snapshot.board_size;
    let cell = (point / snapshot.tile_size).floor();
    let x = cell.x.clamp(0.0, size.x.saturating_sub(1) as f32) as usize;
    let y = cell.y.clamp(0.0, size.y.saturating_sub(1) as f32) as usize;
    (x, y)
}

/// Lays a snapshot out as text: the HUD line, then one line per board row.
pub fn compose(snapshot: &Snapshot) -> Vec<String> {
    let width = snapshot.board_size.x as usize * CELL_WIDTH;
    let height = snapshot.board_size.y as usize;
    let mut grid = vec![vec![' '; width]; height];

    let mut put = |(x, y): (usize, usize), left: char, right: char| {
        if let Some(row) = grid.get_mut(y) {
            let column = x * CELL_WIDTH;
            if column + 1 < row.len() {
                row[column] = left;
                row[column + 1] = right;
            }
        }
    };

    for wall in &snapshot.walls {
        put(cell_of(snapshot, wall.center()), WALL, WALL);
    }
    for pickup in &snapshot.pickups {
        put(cell_of(snapshot, pickup.center()), PICKUP, ' ');
    }
    for adversary in &snapshot.adversaries {
        put(cell_of(snapshot, adversary.rect.center()), adversary_glyph(adversary.variant), ' ');
    }
    let player = &snapshot.player;
    put(cell_of(snapshot, player.rect.center()), player_glyph(player.facing), ' ');

    let mut lines = Vec::with_capacity(height + 1);
    lines.push(snapshot.hud_text());
    lines.extend(grid.into_iter().map(|row| row.into_iter().collect::<String>()));
    lines
}

pub struct TerminalRenderer {
    writer: BufWriter<Stdout>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.writer, terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    fn draw_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for (row, line) in lines.iter().enumerate() {
            queue!(self.writer, MoveTo(0, row as u16))?;

            let mut current = None;
            for glyph in line.chars() {
                let color = glyph_color(glyph);
                if current != Some(color) {
                    queue!(self.writer, SetForegroundColor(color))?;
                    current = Some(color);
                }
                queue!(self.writer, Print(glyph))?;
            }
            queue!(self.writer, Clear(ClearType::UntilNewLine))?;
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> GameResult<()> {
        let lines = compose(snapshot);
        self.draw_lines(&lines)
            .map_err(|e| GameError::Render(format!("Failed to draw frame: {e}")))
    }
}
