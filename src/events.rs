//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{Direction, Input},
    App,
};

/// Action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    /// Feed an input to the game.
    Game(Input),
    /// Leave the application.
    Quit,
}

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the game based on the key
/// pressed. It uses a timeout to avoid blocking the UI, so the level-clear pause is checked at
/// least every poll interval.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match map_key(key.code) {
                    Some(KeyAction::Game(input)) => app.apply(input, Instant::now()),
                    Some(KeyAction::Quit) => app.exit = true,
                    None => {}
                }
            }
        }
    }

    app.tick(Instant::now());

    Ok(())
}

/// Maps a key to its action, if it has one.
///
/// Arrows and the `h`, `j`, `k` and `l` keys move the player, space advances to the next level
/// (or restarts the current one) and `q` quits.
pub(crate) const fn map_key(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Game(Input::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Game(Input::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Game(Input::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Game(Input::Move(Direction::Right)),
        KeyCode::Char(' ') => KeyAction::Game(Input::Advance),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => return None,
    };

    Some(action)
}
