//! Terminal dashboard for running focus sessions.
//!
//! Shows every session of a [`FocusRun`] with a live gauge and lets the
//! user pause, resume and stop them. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FocusError;
use crate::features::focus::FocusRun;

/// Run the dashboard until every session has ended or the user quits.
///
/// Quitting stops the sessions still running or paused.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run(run: &mut FocusRun<'_>) -> Result<(), FocusError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocusError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let mut app = App::new(&mut *run);
            let result = run_app(&mut terminal, &mut app);
            terminal.show_cursor().ok();
            result
        }
        Err(e) => Err(FocusError::Terminal(format!("Failed to create terminal: {e}"))),
    };

    // Restore terminal
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    if result.is_err() {
        run.stop_all();
    }
    result
}

/// Run the main dashboard loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_, '_>) -> Result<(), FocusError> {
    loop {
        app.refresh();
        if app.is_finished() {
            break;
        }

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => {
                    app.stop_all();
                    break;
                }
                event::Action::TogglePause => app.toggle_selected(),
                event::Action::Stop => app.stop_selected(),
            }
        }
    }

    Ok(())
}
