mod session;

use super::config::{ConfigError, GameConfig};
use super::constants::CLOCK_PERIOD_MS;
use super::world::World;
use crate::protocol::{self, ClientMessage};
use serde::Serialize;
use session::{SessionBroadcaster, SessionEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

/// A world plus the sessions playing in it. All world and roster mutation
/// goes through `state`, driven by a single loop task.
#[derive(Debug)]
pub struct Room {
  name: String,
  state: Mutex<RoomState>,
  running: AtomicBool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomStats {
  pub room: String,
  pub sessions: usize,
  pub players: usize,
  pub running: bool,
  pub alive_snakes: usize,
  pub foods: usize,
  pub elapsed: u64,
  pub current_delay: u64,
}

#[derive(Debug)]
struct RoomState {
  sessions: HashMap<String, SessionEntry>,
  world: World,
}

impl Room {
  pub fn new(name: impl Into<String>, config: GameConfig) -> Result<Self, ConfigError> {
    let world = World::new(config, &mut rand::thread_rng())?;
    Ok(Self {
      name: name.into(),
      state: Mutex::new(RoomState {
        sessions: HashMap::new(),
        world,
      }),
      running: AtomicBool::new(false),
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::SeqCst)
  }

  /// Registers a connection and gives it a fresh snake. The returned id names
  /// both the session and its player.
  pub async fn add_session(self: &Arc<Self>, sender: UnboundedSender<String>) -> String {
    let mut state = self.state.lock().await;
    let session_id = state.add_session(sender);
    tracing::info!(room = %self.name, session_id = %session_id, "session joined");
    drop(state);
    self.ensure_loop();
    session_id
  }

  pub async fn remove_session(&self, session_id: &str) {
    let mut state = self.state.lock().await;
    state.disconnect_session(session_id);
  }

  pub async fn handle_text_message(&self, session_id: &str, text: &str) {
    let Some(message) = protocol::decode_client_message(text) else {
      tracing::trace!(session_id, "dropping malformed client frame");
      return;
    };
    let mut state = self.state.lock().await;
    match message {
      ClientMessage::Movement { key } => {
        if !state.world.handle_key(session_id, &key) {
          tracing::trace!(session_id, key = %key, "movement rejected");
        }
      }
    }
  }

  pub async fn stats(&self) -> RoomStats {
    let state = self.state.lock().await;
    RoomStats {
      room: self.name.clone(),
      sessions: state.sessions.len(),
      players: state.world.player_count(),
      running: self.is_running(),
      alive_snakes: state.world.alive_count(),
      foods: state.world.foods().len(),
      elapsed: state.world.clock().elapsed,
      current_delay: state.world.clock().current_delay,
    }
  }

  fn ensure_loop(self: &Arc<Self>) {
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let room = Arc::clone(self);
    tokio::spawn(async move {
      room.run_loop().await;
    });
  }

  /// Ticks the snakes on the current delay and the clock once a second until
  /// the last session leaves.
  async fn run_loop(&self) {
    tracing::info!(room = %self.name, "room loop started");
    let mut clock = tokio::time::interval(Duration::from_millis(CLOCK_PERIOD_MS));
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    clock.tick().await;

    let first_delay = self.state.lock().await.world.clock().tick_delay();
    let next_tick = tokio::time::sleep(first_delay);
    tokio::pin!(next_tick);

    loop {
      tokio::select! {
        () = &mut next_tick => {
          let mut state = self.state.lock().await;
          if state.sessions.is_empty() {
            self.running.store(false, Ordering::SeqCst);
            break;
          }
          state.tick();
          let delay = state.world.clock().tick_delay();
          next_tick.as_mut().reset(Instant::now() + delay);
        }
        _ = clock.tick() => {
          let mut state = self.state.lock().await;
          if state.sessions.is_empty() {
            self.running.store(false, Ordering::SeqCst);
            break;
          }
          state.advance_clock();
        }
      }
    }
    tracing::info!(room = %self.name, "room loop stopped");
  }
}

impl RoomState {
  fn add_session(&mut self, sender: UnboundedSender<String>) -> String {
    let session_id = Uuid::new_v4().to_string();
    self.world.add_player(&session_id, &mut rand::thread_rng());
    self
      .sessions
      .insert(session_id.clone(), SessionEntry { sender });
    session_id
  }

  fn disconnect_session(&mut self, session_id: &str) {
    if self.sessions.remove(session_id).is_none() {
      return;
    }
    let score = self
      .world
      .remove_player(session_id)
      .map(|player| player.snake.score());
    tracing::info!(session_id, ?score, "session left");
  }

  fn tick(&mut self) {
    let mut broadcaster = SessionBroadcaster::new(&self.sessions);
    self.world.tick(&mut rand::thread_rng(), &mut broadcaster);
    let stale = broadcaster.into_stale();
    for session_id in stale {
      tracing::warn!(session_id = %session_id, "dropping session with closed channel");
      self.disconnect_session(&session_id);
    }
  }

  fn advance_clock(&mut self) {
    self.world.advance_clock(&mut rand::thread_rng());
  }
}
