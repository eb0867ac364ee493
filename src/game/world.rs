use super::clock::{ClockTick, GameClock};
use super::config::{ConfigError, GameConfig};
use super::entities::{make_food, random_food};
use super::grid::Grid;
use super::picker::{pick, pick_safe};
use super::player::{Player, PlayerSettings};
use super::simulation::{step, StepOutcome};
use super::snake::Snake;
use super::types::{Food, Position};
use rand::Rng;
use std::collections::HashMap;

/// Receives the post-tick state once per player. Rendering and network
/// broadcast both hang off this.
pub trait WorldObserver {
  fn observe(&mut self, player: &Player, world: &World);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStep {
  pub player_id: String,
  pub outcome: StepOutcome,
}

/// One grid, its shared food and every snake on it.
#[derive(Debug)]
pub struct World {
  config: GameConfig,
  grid: Grid,
  clock: GameClock,
  foods: Vec<Food>,
  players: HashMap<String, Player>,
}

impl World {
  pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
    config.validate()?;
    let grid = Grid::new(&config.size)?;
    let clock = GameClock::new(&config);
    let first_food = random_food(&grid, rng);
    Ok(Self {
      config,
      grid,
      clock,
      foods: vec![first_food],
      players: HashMap::new(),
    })
  }

  pub fn config(&self) -> &GameConfig {
    &self.config
  }

  pub fn clock(&self) -> &GameClock {
    &self.clock
  }

  #[cfg(test)]
  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn foods(&self) -> &[Food] {
    &self.foods
  }

  pub fn player(&self, player_id: &str) -> Option<&Player> {
    self.players.get(player_id)
  }

  pub fn player_count(&self) -> usize {
    self.players.len()
  }

  pub fn alive_count(&self) -> usize {
    self.players.values().filter(|player| player.is_alive()).count()
  }

  pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
    self.players.values().map(|player| &player.snake)
  }

  pub fn add_player<R: Rng + ?Sized>(&mut self, player_id: &str, rng: &mut R) -> &Player {
    self.add_player_with_settings(player_id, PlayerSettings::default(), rng)
  }

  /// Spawns on a random cell without avoiding other snakes; snakes never
  /// collide with each other.
  pub fn add_player_with_settings<R: Rng + ?Sized>(
    &mut self,
    player_id: &str,
    settings: PlayerSettings,
    rng: &mut R,
  ) -> &Player {
    let origin = pick(&self.grid, rng);
    let player = Player {
      id: player_id.to_string(),
      snake: Snake::spawn(origin, self.config.size.base),
      settings,
    };
    self.players.insert(player_id.to_string(), player);
    &self.players[player_id]
  }

  pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
    self.players.remove(player_id)
  }

  pub fn handle_key(&mut self, player_id: &str, key: &str) -> bool {
    let Some(player) = self.players.get_mut(player_id) else { return false };
    player.settings.queue_key(key)
  }

  /// Every cell covered by a snake or a food.
  pub fn occupied(&self) -> Vec<Position> {
    let mut occupied: Vec<Position> = self.foods.iter().map(Food::position).collect();
    for snake in self.snakes() {
      occupied.extend(snake.positions());
    }
    occupied
  }

  pub fn spawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Food {
    let occupied = self.occupied();
    let food = make_food(pick_safe(&self.grid, &occupied, rng));
    self.foods.push(food);
    food
  }

  /// Advances every snake one cell, then hands each player the new state.
  pub fn tick<R: Rng + ?Sized>(
    &mut self,
    rng: &mut R,
    observer: &mut dyn WorldObserver,
  ) -> Vec<PlayerStep> {
    let player_ids: Vec<String> = self.players.keys().cloned().collect();
    let mut steps = Vec::with_capacity(player_ids.len());
    for id in player_ids {
      let Some(player) = self.players.get_mut(&id) else { continue };
      let outcome = step(
        &mut player.snake,
        &mut player.settings,
        &mut self.foods,
        &self.config.size,
      );
      match outcome {
        StepOutcome::Ate => {
          self.spawn_food(rng);
        }
        StepOutcome::GameOver {
          score,
          new_high_score,
        } => {
          tracing::debug!(player_id = %id, score, new_high_score, "game over");
        }
        StepOutcome::Idle | StepOutcome::Moved => {}
      }
      steps.push(PlayerStep {
        player_id: id,
        outcome,
      });
    }

    for player in self.players.values() {
      observer.observe(player, self);
    }
    steps
  }

  pub fn advance_clock<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ClockTick {
    let tick = self.clock.advance(&self.config, self.foods.len(), rng);
    if tick.delay_decreased {
      tracing::debug!(delay_ms = self.clock.current_delay, "tick delay decreased");
    }
    if tick.spawn_food {
      let food = self.spawn_food(rng);
      tracing::debug!(x = food.x, y = food.y, elapsed = self.clock.elapsed, "food spawned");
    }
    tick
  }

  #[cfg(test)]
  pub(crate) fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
    self.players.get_mut(player_id)
  }

  #[cfg(test)]
  pub(crate) fn set_foods(&mut self, foods: Vec<Food>) {
    self.foods = foods;
  }
}
