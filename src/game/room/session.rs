use crate::game::player::Player;
use crate::game::world::{World, WorldObserver};
use crate::protocol::encode_update;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug)]
pub(super) struct SessionEntry {
  pub(super) sender: UnboundedSender<String>,
}

/// Pushes each player's update to its own session and remembers which
/// senders have gone away.
pub(super) struct SessionBroadcaster<'a> {
  sessions: &'a HashMap<String, SessionEntry>,
  stale: Vec<String>,
}

impl<'a> SessionBroadcaster<'a> {
  pub(super) fn new(sessions: &'a HashMap<String, SessionEntry>) -> Self {
    Self {
      sessions,
      stale: Vec::new(),
    }
  }

  pub(super) fn into_stale(self) -> Vec<String> {
    self.stale
  }
}

impl WorldObserver for SessionBroadcaster<'_> {
  fn observe(&mut self, player: &Player, world: &World) {
    let Some(session) = self.sessions.get(&player.id) else { return };
    let payload = match encode_update(player, world) {
      Ok(payload) => payload,
      Err(error) => {
        tracing::warn!(?error, player_id = %player.id, "failed to encode update");
        return;
      }
    };
    if session.sender.send(payload).is_err() {
      self.stale.push(player.id.clone());
    }
  }
}
