use super::config::{ConfigError, SizeConfig};
use super::types::Position;

/// Every cell origin on a `width` x `height` surface, column by column.
pub fn generate_grid_positions(width: i32, height: i32, cell: i32) -> Vec<Position> {
  if cell <= 0 {
    return Vec::new();
  }
  let squares_x = width.max(0) / cell;
  let squares_y = height.max(0) / cell;
  let mut positions = Vec::with_capacity((squares_x as usize).saturating_mul(squares_y as usize));
  for i in 0..squares_x {
    for j in 0..squares_y {
      positions.push(Position::new(i * cell, j * cell));
    }
  }
  positions
}

/// Non-empty set of cell positions for one world.
#[derive(Debug, Clone)]
pub struct Grid {
  positions: Vec<Position>,
}

impl Grid {
  pub fn new(size: &SizeConfig) -> Result<Self, ConfigError> {
    size.check_cell_limit()?;
    let positions = generate_grid_positions(size.width, size.height, size.base);
    if positions.is_empty() {
      return Err(ConfigError::EmptySurface {
        width: size.width,
        height: size.height,
        cell: size.base,
      });
    }
    Ok(Self { positions })
  }

  pub fn positions(&self) -> &[Position] {
    &self.positions
  }

  pub fn len(&self) -> usize {
    self.positions.len()
  }
}
