use super::grid::Grid;
use super::types::Position;
use rand::Rng;

pub fn pick<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
  let positions = grid.positions();
  positions[rng.gen_range(0..positions.len())]
}

/// Redraws while the cell is occupied, giving up after `len / 2` redraws.
/// The last draw is returned even if it still collides.
pub fn pick_safe<R: Rng + ?Sized>(grid: &Grid, occupied: &[Position], rng: &mut R) -> Position {
  let mut attempts = grid.len() / 2;
  let mut position = pick(grid, rng);
  while attempts > 0 && occupied.contains(&position) {
    attempts -= 1;
    position = pick(grid, rng);
  }
  position
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::config::SizeConfig;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn grid(width: i32, height: i32) -> Grid {
    Grid::new(&SizeConfig {
      base: 20,
      width,
      height,
      show_grid: true,
    })
    .expect("grid")
  }

  #[test]
  fn pick_reaches_first_and_last_cells() {
    let grid = grid(60, 20);
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
      let position = pick(&grid, &mut rng);
      assert!(grid.positions().contains(&position));
      seen.insert(position);
    }
    assert_eq!(seen.len(), 3);
  }

  #[test]
  fn pick_on_single_cell_grid_is_that_cell() {
    let grid = grid(20, 20);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(pick(&grid, &mut rng), Position::new(0, 0));
  }

  #[test]
  fn pick_safe_avoids_occupied_cells_when_room_exists() {
    let grid = grid(200, 200);
    let occupied: Vec<Position> = grid.positions()[..50].to_vec();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
      let position = pick_safe(&grid, &occupied, &mut rng);
      assert!(!occupied.contains(&position));
    }
  }

  #[test]
  fn pick_safe_gives_up_on_a_full_grid() {
    let grid = grid(40, 40);
    let occupied = grid.positions().to_vec();
    let mut rng = StdRng::seed_from_u64(3);
    let position = pick_safe(&grid, &occupied, &mut rng);
    assert!(occupied.contains(&position));
  }
}
