use super::grid::Grid;
use super::picker::pick;
use super::types::{Color, Food, Position, Segment};
use rand::Rng;

pub fn make_segment(x: i32, y: i32) -> Segment {
  make_colored_segment(x, y, Color::SEGMENT)
}

pub fn make_colored_segment(x: i32, y: i32, color: Color) -> Segment {
  Segment { x, y, color }
}

pub fn make_food(position: Position) -> Food {
  Food {
    x: position.x,
    y: position.y,
    color: Color::FOOD,
  }
}

pub fn random_food<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Food {
  make_food(pick(grid, rng))
}
