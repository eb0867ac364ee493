use super::constants::{
  BASE_DELAY_MS, CELL_SIZE, DELAY_DECREASE_INTERVAL_SECS, DELAY_DECREASE_MS, HIGH_SCORE_KEY,
  MAX_FOODS, MAX_FOOD_SPAWN_SECS, MAX_GRID_CELLS, MIN_DELAY_DIVISOR, MIN_FOOD_SPAWN_SECS, SHOW_GRID,
  SURFACE_HEIGHT, SURFACE_WIDTH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("{field} must be positive")]
  NotPositive { field: &'static str },
  #[error("surface {width}x{height} holds no cell of size {cell}")]
  EmptySurface { width: i32, height: i32, cell: i32 },
  #[error("surface {width}x{height} with cell {cell} exceeds {max} cells")]
  SurfaceTooLarge {
    width: i32,
    height: i32,
    cell: i32,
    max: usize,
  },
  #[error("food spawn window [{min}, {max}) is empty or starts at zero")]
  SpawnWindow { min: u64, max: u64 },
  #[error("minimum delay {min}ms exceeds base delay {base}ms")]
  DelayFloor { min: u64, base: u64 },
  #[error("invalid value {value:?} for {key}")]
  InvalidValue { key: String, value: String },
}

/// World-wide settings. Everything here is immutable once a world is built;
/// the live delay and elapsed time live in `GameClock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
  pub size: SizeConfig,
  pub time: TimeConfig,
  pub food: FoodConfig,
  pub score: ScoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConfig {
  pub base: i32,
  pub width: i32,
  pub height: i32,
  pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
  pub base_delay: u64,
  pub delay_decrease_factor: u64,
  pub delay_decrease_interval: u64,
  pub min_active_delay: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodConfig {
  pub max_on_game_at_same_time: usize,
  pub min_spawn_time: u64,
  pub max_spawn_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
  pub high_score_key: String,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      size: SizeConfig {
        base: CELL_SIZE,
        width: SURFACE_WIDTH,
        height: SURFACE_HEIGHT,
        show_grid: SHOW_GRID,
      },
      time: TimeConfig::with_base_delay(BASE_DELAY_MS),
      food: FoodConfig {
        max_on_game_at_same_time: MAX_FOODS,
        min_spawn_time: MIN_FOOD_SPAWN_SECS,
        max_spawn_time: MAX_FOOD_SPAWN_SECS,
      },
      score: ScoreConfig {
        high_score_key: HIGH_SCORE_KEY.to_string(),
      },
    }
  }
}

impl SizeConfig {
  /// Whole cells on the surface; `None` if the count overflows.
  pub fn cell_count(&self) -> Option<usize> {
    if self.base <= 0 {
      return Some(0);
    }
    let columns = usize::try_from(self.width.max(0) / self.base).ok()?;
    let rows = usize::try_from(self.height.max(0) / self.base).ok()?;
    columns.checked_mul(rows)
  }

  pub fn check_cell_limit(&self) -> Result<(), ConfigError> {
    match self.cell_count() {
      Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
      _ => Err(ConfigError::SurfaceTooLarge {
        width: self.width,
        height: self.height,
        cell: self.base,
        max: MAX_GRID_CELLS,
      }),
    }
  }
}

impl TimeConfig {
  /// Floor is a quarter of the base delay.
  pub fn with_base_delay(base_delay: u64) -> Self {
    Self {
      base_delay,
      delay_decrease_factor: DELAY_DECREASE_MS,
      delay_decrease_interval: DELAY_DECREASE_INTERVAL_SECS,
      min_active_delay: base_delay / MIN_DELAY_DIVISOR,
    }
  }
}

impl GameConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.size.base <= 0 {
      return Err(ConfigError::NotPositive { field: "cell size" });
    }
    if self.size.width <= 0 {
      return Err(ConfigError::NotPositive { field: "width" });
    }
    if self.size.height <= 0 {
      return Err(ConfigError::NotPositive { field: "height" });
    }
    if self.size.width < self.size.base || self.size.height < self.size.base {
      return Err(ConfigError::EmptySurface {
        width: self.size.width,
        height: self.size.height,
        cell: self.size.base,
      });
    }
    self.size.check_cell_limit()?;
    if self.time.base_delay == 0 {
      return Err(ConfigError::NotPositive { field: "base delay" });
    }
    if self.time.min_active_delay == 0 {
      return Err(ConfigError::NotPositive {
        field: "minimum delay",
      });
    }
    if self.time.delay_decrease_interval == 0 {
      return Err(ConfigError::NotPositive {
        field: "delay decrease interval",
      });
    }
    if self.time.min_active_delay > self.time.base_delay {
      return Err(ConfigError::DelayFloor {
        min: self.time.min_active_delay,
        base: self.time.base_delay,
      });
    }
    if self.food.min_spawn_time == 0 || self.food.min_spawn_time >= self.food.max_spawn_time {
      return Err(ConfigError::SpawnWindow {
        min: self.food.min_spawn_time,
        max: self.food.max_spawn_time,
      });
    }
    Ok(())
  }

  /// Shown in the HUD as "Difficult".
  pub fn difficulty(&self, current_delay: u64) -> u64 {
    self.time.base_delay.saturating_sub(current_delay)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid() {
    let config = GameConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.time.min_active_delay, 20);
    assert_eq!(config.score.high_score_key, "HIGH_SCORE");
  }

  #[test]
  fn surface_smaller_than_a_cell_is_rejected() {
    let mut config = GameConfig::default();
    config.size.width = 10;
    assert_eq!(
      config.validate(),
      Err(ConfigError::EmptySurface {
        width: 10,
        height: 600,
        cell: 20,
      })
    );
  }

  #[test]
  fn spawn_window_must_be_non_empty_and_non_zero() {
    let mut config = GameConfig::default();
    config.food.min_spawn_time = 8;
    assert!(matches!(config.validate(), Err(ConfigError::SpawnWindow { .. })));
    config.food.min_spawn_time = 0;
    assert!(matches!(config.validate(), Err(ConfigError::SpawnWindow { .. })));
  }

  #[test]
  fn tiny_base_delay_leaves_no_floor() {
    let mut config = GameConfig::default();
    config.time = TimeConfig::with_base_delay(3);
    assert_eq!(config.time.min_active_delay, 0);
    assert_eq!(
      config.validate(),
      Err(ConfigError::NotPositive {
        field: "minimum delay"
      })
    );
    config.time = TimeConfig::with_base_delay(4);
    assert_eq!(config.validate(), Ok(()));
  }

  #[test]
  fn oversized_surface_is_rejected_before_allocation() {
    let mut config = GameConfig::default();
    config.size.base = 1;
    config.size.width = i32::MAX;
    config.size.height = i32::MAX;
    assert!(matches!(
      config.validate(),
      Err(ConfigError::SurfaceTooLarge { .. })
    ));
  }

  #[test]
  fn cell_count_ignores_partial_cells() {
    let size = SizeConfig {
      base: 20,
      width: 50,
      height: 610,
      show_grid: false,
    };
    assert_eq!(size.cell_count(), Some(60));
  }

  #[test]
  fn difficulty_counts_milliseconds_shaved_off() {
    let config = GameConfig::default();
    assert_eq!(config.difficulty(80), 0);
    assert_eq!(config.difficulty(71), 9);
  }
}
