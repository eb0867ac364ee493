pub const CELL_SIZE: i32 = 20;
pub const SURFACE_WIDTH: i32 = 600;
pub const SURFACE_HEIGHT: i32 = 600;
pub const SHOW_GRID: bool = true;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

pub const BASE_DELAY_MS: u64 = 80;
pub const DELAY_DECREASE_MS: u64 = 1;
pub const DELAY_DECREASE_INTERVAL_SECS: u64 = 3;
pub const MIN_DELAY_DIVISOR: u64 = 4;
pub const CLOCK_PERIOD_MS: u64 = 1000;

pub const MAX_FOODS: usize = 5;
pub const MIN_FOOD_SPAWN_SECS: u64 = 2;
pub const MAX_FOOD_SPAWN_SECS: u64 = 8;

pub const MAX_GRID_CELLS: usize = 250_000;

pub const HIGH_SCORE_KEY: &str = "HIGH_SCORE";
