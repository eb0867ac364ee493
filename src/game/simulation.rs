use super::config::SizeConfig;
use super::entities::make_segment;
use super::player::PlayerSettings;
use super::snake::Snake;
use super::types::{Color, Food, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
  /// Snake is already over; nothing moved.
  Idle,
  Moved,
  /// A food was removed from the board; the caller owes a replacement.
  Ate,
  GameOver { score: u32, new_high_score: bool },
}

/// Wraps only once a coordinate is strictly past the far edge, so a head may
/// sit on `x == width` for a tick.
pub fn wrap_position(position: Position, size: &SizeConfig) -> Position {
  let mut wrapped = position;
  if wrapped.x > size.width {
    wrapped.x = 0;
  }
  if wrapped.y > size.height {
    wrapped.y = 0;
  }
  if wrapped.x < 0 {
    wrapped.x = size.width;
  }
  if wrapped.y < 0 {
    wrapped.y = size.height;
  }
  wrapped
}

pub fn step(
  snake: &mut Snake,
  settings: &mut PlayerSettings,
  foods: &mut Vec<Food>,
  size: &SizeConfig,
) -> StepOutcome {
  if settings.game_over {
    return StepOutcome::Idle;
  }
  let direction = settings.next_direction();
  let Some(head) = snake.head() else { return StepOutcome::Idle };

  let (dx, dy) = direction.vector();
  let candidate = head.position().offset(dx * size.base, dy * size.base);
  if snake.collides_with_body(candidate) {
    let score = snake.score();
    let new_high_score = settings.record_score(score);
    return StepOutcome::GameOver {
      score,
      new_high_score,
    };
  }

  snake.recolor_head(Color::BODY);
  let next = wrap_position(candidate, size);
  snake.push_head(make_segment(next.x, next.y));

  match foods.iter().position(|food| food.position() == next) {
    Some(index) => {
      foods.remove(index);
      StepOutcome::Ate
    }
    None => {
      snake.drop_tail();
      StepOutcome::Moved
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::entities::{make_colored_segment, make_food};
  use crate::game::types::Direction;

  fn size() -> SizeConfig {
    SizeConfig {
      base: 20,
      width: 600,
      height: 600,
      show_grid: true,
    }
  }

  fn settings_heading(direction: Direction) -> PlayerSettings {
    PlayerSettings {
      direction,
      direction_buffer: Default::default(),
      game_over: false,
      high_score: 0,
    }
  }

  #[test]
  fn plain_tick_moves_head_and_drops_tail() {
    let mut snake = Snake::spawn(Position::new(100, 100), 20);
    let mut settings = PlayerSettings::default();
    let mut foods = Vec::new();

    let outcome = step(&mut snake, &mut settings, &mut foods, &size());

    assert_eq!(outcome, StepOutcome::Moved);
    let segments: Vec<_> = snake.segments().copied().collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].position(), Position::new(160, 100));
    assert_eq!(segments[0].color, Color::Yellow);
    assert_eq!(segments[1].position(), Position::new(140, 100));
    assert_eq!(segments[1].color, Color::White);
    assert_eq!(segments[2].position(), Position::new(120, 100));
    assert!(settings.direction_buffer.is_empty());
  }

  #[test]
  fn eating_grows_by_one_and_removes_the_food() {
    let mut snake = Snake::spawn(Position::new(100, 100), 20);
    let mut settings = settings_heading(Direction::Right);
    let mut foods = vec![make_food(Position::new(160, 100)), make_food(Position::new(0, 0))];

    let outcome = step(&mut snake, &mut settings, &mut foods, &size());

    assert_eq!(outcome, StepOutcome::Ate);
    assert_eq!(snake.len(), 4);
    assert_eq!(foods, vec![make_food(Position::new(0, 0))]);
    assert_eq!(snake.score(), 1);
  }

  #[test]
  fn length_is_conserved_over_many_plain_ticks() {
    let mut snake = Snake::spawn(Position::new(0, 300), 20);
    let mut settings = settings_heading(Direction::Right);
    let mut foods = Vec::new();
    for _ in 0..100 {
      assert_eq!(step(&mut snake, &mut settings, &mut foods, &size()), StepOutcome::Moved);
      assert_eq!(snake.len(), 3);
    }
  }

  #[test]
  fn self_collision_ends_the_game_without_moving() {
    // Head at (40, 20) heading down into (40, 40), which is part of the body.
    let body = [
      make_colored_segment(40, 20, Color::Yellow),
      make_colored_segment(60, 20, Color::White),
      make_colored_segment(60, 40, Color::White),
      make_colored_segment(40, 40, Color::White),
      make_colored_segment(20, 40, Color::White),
    ];
    let mut snake = Snake::from_segments(body);
    let mut settings = settings_heading(Direction::Down);
    settings.high_score = 1;
    let mut foods = Vec::new();

    let outcome = step(&mut snake, &mut settings, &mut foods, &size());

    assert_eq!(
      outcome,
      StepOutcome::GameOver {
        score: 2,
        new_high_score: true,
      }
    );
    assert!(settings.game_over);
    assert_eq!(settings.high_score, 2);
    assert_eq!(snake, Snake::from_segments(body));
  }

  #[test]
  fn game_over_snake_stays_put() {
    let mut snake = Snake::spawn(Position::new(100, 100), 20);
    let before = snake.clone();
    let mut settings = settings_heading(Direction::Right);
    settings.game_over = true;
    let mut foods = Vec::new();

    assert_eq!(step(&mut snake, &mut settings, &mut foods, &size()), StepOutcome::Idle);
    assert_eq!(snake, before);
  }

  #[test]
  fn moving_into_the_old_tail_cell_counts_as_collision() {
    // A 4-long square loop: the next head is the current tail.
    let body = [
      make_colored_segment(20, 0, Color::Yellow),
      make_colored_segment(20, 20, Color::White),
      make_colored_segment(0, 20, Color::White),
      make_colored_segment(0, 0, Color::White),
    ];
    let mut snake = Snake::from_segments(body);
    let mut settings = settings_heading(Direction::Left);
    let mut foods = Vec::new();

    let outcome = step(&mut snake, &mut settings, &mut foods, &size());
    assert!(matches!(outcome, StepOutcome::GameOver { score: 1, .. }));
  }

  #[test]
  fn wrap_threshold_is_strictly_past_the_edge() {
    let size = size();
    assert_eq!(wrap_position(Position::new(600, 20), &size), Position::new(600, 20));
    assert_eq!(wrap_position(Position::new(620, 20), &size), Position::new(0, 20));
    assert_eq!(wrap_position(Position::new(20, 620), &size), Position::new(20, 0));
    assert_eq!(wrap_position(Position::new(-20, 20), &size), Position::new(600, 20));
    assert_eq!(wrap_position(Position::new(20, -20), &size), Position::new(20, 600));
  }

  #[test]
  fn head_on_the_edge_wraps_on_the_next_tick() {
    let mut snake = Snake::from_segments([
      make_colored_segment(600, 40, Color::Yellow),
      make_colored_segment(580, 40, Color::White),
      make_colored_segment(560, 40, Color::White),
    ]);
    let mut settings = settings_heading(Direction::Right);
    let mut foods = Vec::new();

    step(&mut snake, &mut settings, &mut foods, &size());
    assert_eq!(snake.head().map(|head| head.position()), Some(Position::new(0, 40)));
  }

  #[test]
  fn buffered_turn_applies_before_moving() {
    let mut snake = Snake::spawn(Position::new(100, 100), 20);
    let mut settings = settings_heading(Direction::Right);
    assert!(settings.queue_key("w"));
    let mut foods = Vec::new();

    step(&mut snake, &mut settings, &mut foods, &size());
    assert_eq!(settings.direction, Direction::Up);
    assert_eq!(snake.head().map(|head| head.position()), Some(Position::new(140, 80)));
  }
}
