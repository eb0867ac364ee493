use super::input::accept_key;
use super::snake::Snake;
use super::types::Direction;
use serde::Serialize;
use std::collections::VecDeque;

/// Per-session movement and score state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSettings {
  pub direction: Direction,
  pub direction_buffer: VecDeque<Direction>,
  pub game_over: bool,
  pub high_score: u32,
}

impl Default for PlayerSettings {
  fn default() -> Self {
    Self {
      direction: Direction::Right,
      direction_buffer: VecDeque::from([Direction::Right]),
      game_over: false,
      high_score: 0,
    }
  }
}

impl PlayerSettings {
  pub fn with_high_score(high_score: u32) -> Self {
    Self {
      high_score,
      ..Self::default()
    }
  }

  /// Queues a key if it passes the no-reverse rule. Returns whether it was kept.
  pub fn queue_key(&mut self, key: &str) -> bool {
    match accept_key(self.direction, key) {
      Some(direction) => {
        self.direction_buffer.push_back(direction);
        true
      }
      None => false,
    }
  }

  /// One buffered input per tick.
  pub(crate) fn next_direction(&mut self) -> Direction {
    if let Some(direction) = self.direction_buffer.pop_front() {
      self.direction = direction;
    }
    self.direction
  }

  /// Returns true when the high score was beaten.
  pub(crate) fn record_score(&mut self, score: u32) -> bool {
    self.game_over = true;
    if score > self.high_score {
      self.high_score = score;
      return true;
    }
    false
  }
}

#[derive(Debug, Clone)]
pub struct Player {
  pub id: String,
  pub snake: Snake,
  pub settings: PlayerSettings,
}

impl Player {
  pub fn is_alive(&self) -> bool {
    !self.settings.game_over
  }
}

/// What a client learns about its own session each tick.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettingsView {
  pub direction: Direction,
  pub score: u32,
  pub high_score: u32,
  pub game_over: bool,
}

impl From<&Player> for ClientSettingsView {
  fn from(player: &Player) -> Self {
    Self {
      direction: player.settings.direction,
      score: player.snake.score(),
      high_score: player.settings.high_score,
      game_over: player.settings.game_over,
    }
  }
}
