use crate::game::config::{ConfigError, GameConfig, TimeConfig};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_SOLO_SCORE_PATH: &str = "data/solo_scores.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Server,
    Solo,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: GameMode,
    pub port: u16,
    pub static_dir: PathBuf,
    pub solo_score_path: PathBuf,
    pub game: GameConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset or blank variables fall back to defaults; anything unparsable is
    /// an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mode = match var("GAME_MODE").as_deref() {
            None | Some("server") => GameMode::Server,
            Some("solo") => GameMode::Solo,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "GAME_MODE".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let defaults = GameConfig::default();
        let mut game = defaults.clone();
        game.size.base = parse_var(&var, "SNAKE_CELL_SIZE", defaults.size.base)?;
        game.size.width = parse_var(&var, "SNAKE_WIDTH", defaults.size.width)?;
        game.size.height = parse_var(&var, "SNAKE_HEIGHT", defaults.size.height)?;
        game.size.show_grid = parse_flag(&var, "SNAKE_SHOW_GRID", defaults.size.show_grid)?;

        let base_delay = parse_var(&var, "SNAKE_BASE_DELAY_MS", defaults.time.base_delay)?;
        game.time = TimeConfig::with_base_delay(base_delay);
        game.time.delay_decrease_factor = parse_var(
            &var,
            "SNAKE_DELAY_STEP_MS",
            defaults.time.delay_decrease_factor,
        )?;
        game.time.delay_decrease_interval = parse_var(
            &var,
            "SNAKE_DELAY_INTERVAL_SECS",
            defaults.time.delay_decrease_interval,
        )?;

        game.food.max_on_game_at_same_time = parse_var(
            &var,
            "SNAKE_MAX_FOODS",
            defaults.food.max_on_game_at_same_time,
        )?;
        game.food.min_spawn_time =
            parse_var(&var, "SNAKE_MIN_SPAWN_SECS", defaults.food.min_spawn_time)?;
        game.food.max_spawn_time =
            parse_var(&var, "SNAKE_MAX_SPAWN_SECS", defaults.food.max_spawn_time)?;
        game.validate()?;

        Ok(Self {
            mode,
            port: parse_var(&var, "PORT", DEFAULT_PORT)?,
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            solo_score_path: var("SOLO_SCORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLO_SCORE_PATH)),
            game,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key).as_deref() {
        Some("1" | "true" | "TRUE") => Ok(true),
        Some("0" | "false" | "FALSE") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
        }),
        None => Ok(default),
    }
}
