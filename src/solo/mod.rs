pub mod game;
pub mod render;
pub mod store;

use crate::app::config::AppConfig;
use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use game::{SoloGame, SoloOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::TextRenderer;
use std::io;
use std::time::Duration;
use store::JsonFileStore;
use tokio::sync::mpsc::{self, UnboundedSender};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Plays one single-player round in the terminal. `w a s d` or the arrow
/// keys steer; `q`, Esc or Ctrl-C leave.
pub async fn run_solo_mode(config: &AppConfig) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&config.solo_score_path)?;
    let renderer = TextRenderer::new(io::stdout(), true);
    let game = SoloGame::new(config.game.clone(), store, renderer, StdRng::from_entropy())?;
    tracing::info!("solo game started");

    let outcome = {
        let _terminal = RawTerminal::enter()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || forward_terminal_keys(tx));
        let outcome = game.run(rx).await;
        match reader.await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => tracing::warn!(?error, "terminal input failed"),
            Err(error) => tracing::warn!(?error, "terminal input task panicked"),
        }
        outcome?
    };

    match outcome {
        SoloOutcome::GameOver { score, high_score } => {
            tracing::info!(score, high_score, "game over");
            println!("Game over. Score: {score}, best: {high_score}");
        }
        SoloOutcome::Quit { score } => {
            tracing::info!(score, "left the game");
            println!("Left the game. Score: {score}");
        }
    }
    Ok(())
}

/// Raw mode on the alternate screen for as long as the guard lives.
struct RawTerminal;

impl RawTerminal {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to switch to the alternate screen")?;
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::warn!(?error, "failed to leave the alternate screen");
        }
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::warn!(?error, "failed to disable raw mode");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyInput {
    Move(&'static str),
    Quit,
    Ignore,
}

fn key_input(event: KeyEvent) -> KeyInput {
    if event.kind != KeyEventKind::Press {
        return KeyInput::Ignore;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyInput::Quit,
        KeyCode::Esc => KeyInput::Quit,
        KeyCode::Up => KeyInput::Move("w"),
        KeyCode::Left => KeyInput::Move("a"),
        KeyCode::Down => KeyInput::Move("s"),
        KeyCode::Right => KeyInput::Move("d"),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => KeyInput::Move("w"),
            'a' => KeyInput::Move("a"),
            's' => KeyInput::Move("s"),
            'd' => KeyInput::Move("d"),
            'q' => KeyInput::Quit,
            _ => KeyInput::Ignore,
        },
        _ => KeyInput::Ignore,
    }
}

/// Blocking pump from terminal key events into the game. Returns when the
/// player quits or the game drops its receiver.
fn forward_terminal_keys(tx: UnboundedSender<String>) -> io::Result<()> {
    while !tx.is_closed() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        match key_input(key) {
            KeyInput::Move(key) => {
                if tx.send(key.to_string()).is_err() {
                    break;
                }
            }
            KeyInput::Quit => break,
            KeyInput::Ignore => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_and_arrows_map_to_movement_keys() {
        assert_eq!(key_input(press(KeyCode::Char('w'))), KeyInput::Move("w"));
        assert_eq!(key_input(press(KeyCode::Char('D'))), KeyInput::Move("d"));
        assert_eq!(key_input(press(KeyCode::Left)), KeyInput::Move("a"));
        assert_eq!(key_input(press(KeyCode::Down)), KeyInput::Move("s"));
    }

    #[test]
    fn quit_keys_end_input() {
        assert_eq!(key_input(press(KeyCode::Char('q'))), KeyInput::Quit);
        assert_eq!(key_input(press(KeyCode::Esc)), KeyInput::Quit);
        assert_eq!(
            key_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyInput::Quit
        );
    }

    #[test]
    fn releases_and_other_keys_are_ignored() {
        let mut release = press(KeyCode::Char('w'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_input(release), KeyInput::Ignore);
        assert_eq!(key_input(press(KeyCode::Char('x'))), KeyInput::Ignore);
        assert_eq!(key_input(press(KeyCode::Enter)), KeyInput::Ignore);
    }
}
