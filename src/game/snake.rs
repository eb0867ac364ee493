use super::constants::INITIAL_SNAKE_LENGTH;
use super::entities::make_segment;
use super::types::{Color, Position, Segment};
use serde::Serialize;
use std::collections::VecDeque;

/// Head-first body. Serialized as a plain array of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snake {
  segments: VecDeque<Segment>,
}

impl Snake {
  /// Lays out the starting body to the right of `origin`, head first.
  pub fn spawn(origin: Position, cell: i32) -> Self {
    let segments = (0..INITIAL_SNAKE_LENGTH as i32)
      .rev()
      .map(|offset| make_segment(origin.x + cell * offset, origin.y))
      .collect();
    Self { segments }
  }

  #[cfg(test)]
  pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
    Self {
      segments: segments.into_iter().collect(),
    }
  }

  pub fn head(&self) -> Option<&Segment> {
    self.segments.front()
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn segments(&self) -> impl Iterator<Item = &Segment> {
    self.segments.iter()
  }

  pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
    self.segments.iter().map(Segment::position)
  }

  /// Checks everything behind the head, including the tail that may be about
  /// to move out of the way.
  pub fn collides_with_body(&self, position: Position) -> bool {
    self
      .segments
      .iter()
      .skip(1)
      .any(|segment| segment.position() == position)
  }

  /// Cells grown since spawning.
  pub fn score(&self) -> u32 {
    self.segments.len().saturating_sub(INITIAL_SNAKE_LENGTH) as u32
  }

  pub(crate) fn recolor_head(&mut self, color: Color) {
    if let Some(head) = self.segments.front_mut() {
      head.color = color;
    }
  }

  pub(crate) fn push_head(&mut self, segment: Segment) {
    self.segments.push_front(segment);
  }

  pub(crate) fn drop_tail(&mut self) -> Option<Segment> {
    self.segments.pop_back()
  }
}
