use super::types::Direction;

/// Maps a raw key to a direction unless it would reverse straight into the
/// neck of a snake currently heading `current`.
pub fn accept_key(current: Direction, key: &str) -> Option<Direction> {
  let direction = Direction::from_key(key)?;
  if direction == current.opposite() {
    return None;
  }
  Some(direction)
}
