use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
  pub x: i32,
  pub y: i32,
}

impl Position {
  pub fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  pub fn offset(self, dx: i32, dy: i32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

/// Color tags are sent as-is to the browser, so they must stay valid CSS names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
  Yellow,
  White,
  Red,
}

impl Color {
  pub const SEGMENT: Color = Color::Yellow;
  pub const BODY: Color = Color::White;
  pub const FOOD: Color = Color::Red;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
  pub x: i32,
  pub y: i32,
  pub color: Color,
}

impl Segment {
  pub fn position(&self) -> Position {
    Position::new(self.x, self.y)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
  pub x: i32,
  pub y: i32,
  pub color: Color,
}

impl Food {
  pub fn position(&self) -> Position {
    Position::new(self.x, self.y)
  }
}

/// Serialized with the key symbol the browser sends (`w`, `s`, `a`, `d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
  #[serde(rename = "w")]
  Up,
  #[serde(rename = "s")]
  Down,
  #[serde(rename = "a")]
  Left,
  #[serde(rename = "d")]
  Right,
}

impl Direction {
  pub fn from_key(key: &str) -> Option<Self> {
    match key {
      "w" => Some(Direction::Up),
      "s" => Some(Direction::Down),
      "a" => Some(Direction::Left),
      "d" => Some(Direction::Right),
      _ => None,
    }
  }

  #[cfg(test)]
  pub fn key(self) -> &'static str {
    match self {
      Direction::Up => "w",
      Direction::Down => "s",
      Direction::Left => "a",
      Direction::Right => "d",
    }
  }

  pub fn vector(self) -> (i32, i32) {
    match self {
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }
}
