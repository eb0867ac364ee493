use axum::{
  extract::{Path, State, WebSocketUpgrade},
  http::{Method, StatusCode},
  response::IntoResponse,
  routing::get,
  Json, Router,
};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::EnvFilter;

mod app;
mod game;
mod protocol;
mod solo;
mod transport;

use app::config::{AppConfig, GameMode};
use app::room_name::sanitize_room_name;
use game::config::{ConfigError, GameConfig};
use game::room::{Room, RoomStats};
use transport::ws_session::handle_socket;

struct AppState {
  rooms: DashMap<String, Arc<Room>>,
  game: GameConfig,
}

#[derive(Debug, Serialize)]
struct OkResponse {
  ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
  ok: bool,
  error: String,
}

#[derive(Debug, Serialize)]
struct RoomsResponse {
  rooms: Vec<RoomStats>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let config = AppConfig::from_env()?;
  match config.mode {
    GameMode::Solo => solo::run_solo_mode(&config).await,
    GameMode::Server => run_server(config).await,
  }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
  let state = Arc::new(AppState {
    rooms: DashMap::new(),
    game: config.game.clone(),
  });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET])
    .allow_headers(Any);

  let app: Router = Router::new()
    .route("/api/health", get(health))
    .route("/api/rooms", get(rooms_get))
    .route("/api/room/:room", get(ws_handler))
    .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
    .nest_service("/static", ServeDir::new(&config.static_dir))
    .layer(cors)
    .with_state(state);

  let address = format!("0.0.0.0:{}", config.port);
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}

impl AppState {
  fn room(&self, name: String) -> Result<Arc<Room>, ConfigError> {
    match self.rooms.entry(name) {
      dashmap::mapref::entry::Entry::Occupied(entry) => Ok(entry.get().clone()),
      dashmap::mapref::entry::Entry::Vacant(entry) => {
        let room = Arc::new(Room::new(entry.key().clone(), self.game.clone())?);
        tracing::info!(room = %room.name(), "room created");
        entry.insert(room.clone());
        Ok(room)
      }
    }
  }
}

async fn health() -> impl IntoResponse {
  Json(OkResponse { ok: true })
}

async fn rooms_get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let rooms: Vec<Arc<Room>> = state
    .rooms
    .iter()
    .map(|entry| entry.value().clone())
    .collect();
  let mut stats = Vec::with_capacity(rooms.len());
  for room in rooms {
    stats.push(room.stats().await);
  }
  stats.sort_by(|a, b| a.room.cmp(&b.room));
  Json(RoomsResponse { rooms: stats })
}

async fn ws_handler(
  ws: WebSocketUpgrade,
  Path(room): Path<String>,
  State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
  let room_name = sanitize_room_name(&room);
  let room = match state.room(room_name) {
    Ok(room) => room,
    Err(error) => {
      tracing::error!(%error, "failed to create room");
      return (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
          ok: false,
          error: "Room unavailable".to_string(),
        }),
      )
        .into_response();
    }
  };
  ws.on_upgrade(move |socket| handle_socket(socket, room))
    .into_response()
}
