use super::store::ScoreStore;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::constants::CLOCK_PERIOD_MS;
use crate::game::player::{Player, PlayerSettings};
use crate::game::simulation::StepOutcome;
use crate::game::world::{World, WorldObserver};
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior};

pub const SOLO_PLAYER_ID: &str = "local";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoloOutcome {
    GameOver { score: u32, high_score: u32 },
    /// Input closed before the snake died.
    Quit { score: u32 },
}

/// Single-player game: one snake, rendered straight to a local surface, with
/// the best score kept in a key/value store.
pub struct SoloGame<S, O> {
    world: World,
    store: S,
    surface: O,
    rng: StdRng,
}

impl<S: ScoreStore, O: WorldObserver> SoloGame<S, O> {
    pub fn new(config: GameConfig, store: S, surface: O, mut rng: StdRng) -> Result<Self, ConfigError> {
        let high_score = store
            .get(&config.score.high_score_key)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let mut world = World::new(config, &mut rng)?;
        world.add_player_with_settings(
            SOLO_PLAYER_ID,
            PlayerSettings::with_high_score(high_score),
            &mut rng,
        );
        Ok(Self {
            world,
            store,
            surface,
            rng,
        })
    }

    pub fn player(&self) -> Option<&Player> {
        self.world.player(SOLO_PLAYER_ID)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        self.world.handle_key(SOLO_PLAYER_ID, key)
    }

    /// Steps and renders once; a beaten high score is written through to
    /// the store.
    pub fn tick(&mut self) -> anyhow::Result<StepOutcome> {
        let steps = self.world.tick(&mut self.rng, &mut self.surface);
        let outcome = steps
            .into_iter()
            .next()
            .map(|step| step.outcome)
            .unwrap_or(StepOutcome::Idle);
        if let StepOutcome::GameOver {
            score,
            new_high_score: true,
        } = outcome
        {
            let key = self.world.config().score.high_score_key.clone();
            self.store.set(&key, score.to_string())?;
            tracing::debug!(score, "new solo high score saved");
        }
        Ok(outcome)
    }

    pub fn advance_clock(&mut self) {
        self.world.advance_clock(&mut self.rng);
    }

    pub fn tick_delay(&self) -> Duration {
        self.world.clock().tick_delay()
    }

    fn score(&self) -> u32 {
        self.player().map(|player| player.snake.score()).unwrap_or(0)
    }

    fn high_score(&self) -> u32 {
        self.player()
            .map(|player| player.settings.high_score)
            .unwrap_or(0)
    }

    /// Runs until the snake dies or the key channel closes.
    pub async fn run(mut self, mut keys: UnboundedReceiver<String>) -> anyhow::Result<SoloOutcome> {
        let mut clock = tokio::time::interval(Duration::from_millis(CLOCK_PERIOD_MS));
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        clock.tick().await;

        let next_tick = tokio::time::sleep(self.tick_delay());
        tokio::pin!(next_tick);

        loop {
            tokio::select! {
                () = &mut next_tick => {
                    if let StepOutcome::GameOver { score, .. } = self.tick()? {
                        return Ok(SoloOutcome::GameOver {
                            score,
                            high_score: self.high_score(),
                        });
                    }
                    let delay = self.tick_delay();
                    next_tick.as_mut().reset(Instant::now() + delay);
                }
                _ = clock.tick() => {
                    self.advance_clock();
                }
                key = keys.recv() => {
                    match key {
                        Some(key) => {
                            self.handle_key(&key);
                        }
                        None => return Ok(SoloOutcome::Quit { score: self.score() }),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::make_colored_segment;
    use crate::game::snake::Snake;
    use crate::game::types::{Color, Direction};
    use crate::solo::store::MemoryStore;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct FrameCounter {
        frames: usize,
    }

    impl WorldObserver for FrameCounter {
        fn observe(&mut self, _player: &Player, _world: &World) {
            self.frames += 1;
        }
    }

    fn solo(store: MemoryStore) -> SoloGame<MemoryStore, FrameCounter> {
        SoloGame::new(
            GameConfig::default(),
            store,
            FrameCounter::default(),
            StdRng::seed_from_u64(13),
        )
        .expect("game")
    }

    fn doom_the_snake(game: &mut SoloGame<MemoryStore, FrameCounter>) {
        let player = game.world.player_mut(SOLO_PLAYER_ID).expect("player");
        player.snake = Snake::from_segments([
            make_colored_segment(20, 0, Color::Yellow),
            make_colored_segment(20, 20, Color::White),
            make_colored_segment(0, 20, Color::White),
            make_colored_segment(0, 0, Color::White),
        ]);
        player.settings.direction_buffer.clear();
        player.settings.direction = Direction::Left;
    }

    #[test]
    fn stored_high_score_is_loaded() {
        let mut store = MemoryStore::default();
        store.set("HIGH_SCORE", "5".to_string()).expect("set");
        let game = solo(store);
        assert_eq!(game.high_score(), 5);
    }

    #[test]
    fn unreadable_high_score_counts_as_zero() {
        let mut store = MemoryStore::default();
        store.set("HIGH_SCORE", "NaN".to_string()).expect("set");
        let game = solo(store);
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn every_tick_renders_once() {
        let mut game = solo(MemoryStore::default());
        for _ in 0..3 {
            game.tick().expect("tick");
        }
        assert_eq!(game.surface.frames, 3);
    }

    #[test]
    fn beaten_high_score_is_persisted() {
        let mut game = solo(MemoryStore::default());
        doom_the_snake(&mut game);

        let outcome = game.tick().expect("tick");

        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                score: 1,
                new_high_score: true,
            }
        );
        assert_eq!(game.store().get("HIGH_SCORE").as_deref(), Some("1"));
    }

    #[test]
    fn lower_score_leaves_the_store_alone() {
        let mut store = MemoryStore::default();
        store.set("HIGH_SCORE", "9".to_string()).expect("set");
        let mut game = solo(store);
        doom_the_snake(&mut game);

        game.tick().expect("tick");

        assert_eq!(game.store().get("HIGH_SCORE").as_deref(), Some("9"));
        assert_eq!(game.high_score(), 9);
    }

    #[test]
    fn reverse_key_is_refused() {
        let mut game = solo(MemoryStore::default());
        assert!(!game.handle_key("a"));
        assert!(game.handle_key("w"));
    }

    #[tokio::test]
    async fn run_quits_when_input_closes() {
        let game = solo(MemoryStore::default());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(tx);
        let outcome = game.run(rx).await.expect("run");
        assert_eq!(outcome, SoloOutcome::Quit { score: 0 });
    }

    #[tokio::test]
    async fn run_ends_on_game_over() {
        let mut game = solo(MemoryStore::default());
        doom_the_snake(&mut game);
        let (_tx, rx) = mpsc::unbounded_channel();

        let outcome = tokio::time::timeout(Duration::from_secs(2), game.run(rx))
            .await
            .expect("finished before timeout")
            .expect("run");

        assert_eq!(
            outcome,
            SoloOutcome::GameOver {
                score: 1,
                high_score: 1,
            }
        );
    }
}
