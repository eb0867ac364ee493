use crate::game::clock::GameClock;
use crate::game::config::GameConfig;
use crate::game::player::{ClientSettingsView, Player};
use crate::game::snake::Snake;
use crate::game::types::Food;
use crate::game::world::World;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
  Movement { key: String },
}

pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  serde_json::from_str(text).ok()
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage<'a> {
  Update(UpdatePayload<'a>),
}

#[derive(Debug, Serialize)]
pub struct UpdatePayload<'a> {
  pub snake: &'a Snake,
  pub settings: SettingsView<'a>,
  pub game_state: GameStateView<'a>,
  pub client_settings: ClientSettingsView,
}

#[derive(Debug, Serialize)]
pub struct SettingsView<'a> {
  #[serde(flatten)]
  pub config: &'a GameConfig,
  pub clock: &'a GameClock,
}

#[derive(Debug, Serialize)]
pub struct GameStateView<'a> {
  pub foods: &'a [Food],
  pub snakes: Vec<&'a Snake>,
}

impl<'a> UpdatePayload<'a> {
  pub fn new(player: &'a Player, world: &'a World) -> Self {
    Self {
      snake: &player.snake,
      settings: SettingsView {
        config: world.config(),
        clock: world.clock(),
      },
      game_state: GameStateView {
        foods: world.foods(),
        snakes: world.snakes().collect(),
      },
      client_settings: ClientSettingsView::from(player),
    }
  }
}

pub fn encode_update(player: &Player, world: &World) -> serde_json::Result<String> {
  serde_json::to_string(&ServerMessage::Update(UpdatePayload::new(player, world)))
}
