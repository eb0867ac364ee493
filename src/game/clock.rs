use super::config::GameConfig;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Per-world timer state, advanced once per second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameClock {
  pub elapsed: u64,
  pub current_delay: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTick {
  pub delay_decreased: bool,
  pub spawn_food: bool,
}

impl GameClock {
  pub fn new(config: &GameConfig) -> Self {
    Self {
      elapsed: 0,
      current_delay: config.time.base_delay,
    }
  }

  pub fn tick_delay(&self) -> Duration {
    Duration::from_millis(self.current_delay)
  }

  pub fn advance<R: Rng + ?Sized>(
    &mut self,
    config: &GameConfig,
    food_count: usize,
    rng: &mut R,
  ) -> ClockTick {
    let mut tick = ClockTick::default();
    self.elapsed += 1;

    let time = &config.time;
    if self.elapsed % time.delay_decrease_interval == 0 && self.current_delay > time.min_active_delay
    {
      self.current_delay = self
        .current_delay
        .saturating_sub(time.delay_decrease_factor)
        .max(time.min_active_delay);
      tick.delay_decreased = true;
    }

    // Rerolls the modulus every second instead of keeping a spawn timer.
    if food_count < config.food.max_on_game_at_same_time {
      let window = rng.gen_range(config.food.min_spawn_time..config.food.max_spawn_time);
      tick.spawn_food = self.elapsed % window == 0;
    }

    tick
  }
}
