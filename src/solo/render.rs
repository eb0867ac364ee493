use crate::game::player::Player;
use crate::game::types::Color;
use crate::game::world::{World, WorldObserver};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// Numbers shown above the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub elapsed: u64,
    pub score: u32,
    pub best: u32,
    pub difficulty: u64,
}

impl Hud {
    pub fn new(player: &Player, world: &World) -> Self {
        let clock = world.clock();
        Self {
            elapsed: clock.elapsed,
            score: player.snake.score(),
            best: player.settings.high_score,
            difficulty: world.config().difficulty(clock.current_delay),
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("Time: {}m {}s", self.elapsed / 60, self.elapsed % 60),
            format!("Score: {}", self.score),
            format!("Best: {}", self.best),
            format!("Difficult: {}", self.difficulty),
        ]
    }
}

/// Draws the board as characters, one cell per column.
pub struct TextRenderer<W: Write> {
    out: W,
    /// Repaints in place with cursor moves instead of streaming lines.
    terminal: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, terminal: bool) -> Self {
        Self { out, terminal }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn frame(player: &Player, world: &World) -> String {
        let size = &world.config().size;
        let columns = (size.width / size.base).max(0) as usize;
        let rows = (size.height / size.base).max(0) as usize;
        let blank = if size.show_grid { '.' } else { ' ' };
        let mut cells = vec![vec![blank; columns]; rows];

        let mut plot = |x: i32, y: i32, glyph: char| {
            if x < 0 || y < 0 {
                return;
            }
            let (column, row) = ((x / size.base) as usize, (y / size.base) as usize);
            if let Some(cell) = cells.get_mut(row).and_then(|line| line.get_mut(column)) {
                *cell = glyph;
            }
        };

        for food in world.foods() {
            plot(food.x, food.y, '*');
        }
        for snake in world.snakes() {
            for segment in snake.segments() {
                let glyph = match segment.color {
                    Color::Yellow => 'O',
                    Color::White => 'o',
                    Color::Red => '*',
                };
                plot(segment.x, segment.y, glyph);
            }
        }

        let mut frame = String::with_capacity((columns + 1) * (rows + 6));
        for line in Hud::new(player, world).lines() {
            frame.push_str(&line);
            frame.push('\n');
        }
        for row in cells {
            frame.extend(row);
            frame.push('\n');
        }
        if player.settings.game_over {
            frame.push_str("GAME OVER\n");
        }
        frame
    }
}

impl<W: Write> TextRenderer<W> {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.terminal {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
            for (row, line) in frame.lines().enumerate() {
                let Ok(row) = u16::try_from(row) else { break };
                queue!(self.out, MoveTo(0, row), Print(line))?;
            }
        } else {
            self.out.write_all(frame.as_bytes())?;
        }
        self.out.flush()
    }
}

impl<W: Write> WorldObserver for TextRenderer<W> {
    fn observe(&mut self, player: &Player, world: &World) {
        let frame = Self::frame(player, world);
        if let Err(error) = self.draw(&frame) {
            tracing::warn!(?error, "failed to draw frame");
        }
    }
}
