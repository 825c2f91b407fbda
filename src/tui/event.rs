//! Event handling for the dashboard.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FocusError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop every session and quit.
    Quit,
    /// Pause or resume the selected session.
    TogglePause,
    /// Stop the selected session.
    Stop,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_, '_>) -> Result<Option<Action>, FocusError> {
    // Poll with a short timeout so countdowns keep redrawing
    if event::poll(Duration::from_millis(100))
        .map_err(|e| FocusError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| FocusError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map one key press to an action, updating selection state directly.
pub fn handle_key(app: &mut App<'_, '_>, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.cancel_pending();
            return Some(Action::Quit);
        }

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.cancel_pending();
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cancel_pending();
            app.select_previous();
        }

        // Jump to top/bottom
        KeyCode::Char('g') => {
            app.handle_g();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.cancel_pending();
            app.select_last();
        }
        KeyCode::Home => {
            app.cancel_pending();
            app.select_first();
        }

        // Actions
        KeyCode::Char(' ' | 'p') => {
            app.cancel_pending();
            return Some(Action::TogglePause);
        }
        KeyCode::Char('x') => {
            app.cancel_pending();
            return Some(Action::Stop);
        }

        // Help
        KeyCode::Char('?') => {
            app.cancel_pending();
            app.status = Some(
                "j/k:nav | space/p:pause/resume | x:stop | q:stop all and quit".to_string(),
            );
        }

        _ => {
            app.cancel_pending();
        }
    }

    None
}
