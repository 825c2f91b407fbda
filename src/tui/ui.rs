//! UI rendering for the dashboard.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_clock, SessionSnapshot};
use crate::tui::app::App;

/// Rows taken by one session gauge, borders included.
const GAUGE_HEIGHT: u16 = 3;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_, '_>) {
    // Create layout: header, sessions, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Sessions
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_sessions(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_, '_>, area: Rect) {
    let running = app.running_count();
    let paused = app.sessions.len() - running;
    let title = format!(" Focus sessions ({running} running, {paused} paused) ");

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Index of the first visible session so the selection stays on screen.
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

/// Render one gauge per session.
fn render_sessions(frame: &mut Frame<'_>, app: &App<'_, '_>, area: Rect) {
    let visible = usize::from(area.height / GAUGE_HEIGHT);
    let offset = scroll_offset(app.selected, visible);
    let shown: Vec<(usize, &SessionSnapshot)> = app
        .sessions
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .collect();

    let mut constraints = vec![Constraint::Length(GAUGE_HEIGHT); shown.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, (i, session)) in rows.iter().zip(shown) {
        frame.render_widget(session_gauge(session, i == app.selected), *row);
    }
}

fn session_gauge(session: &SessionSnapshot, is_selected: bool) -> Gauge<'static> {
    let (color, state) = if session.is_running {
        (Color::Green, "")
    } else {
        (Color::Yellow, " (paused)")
    };

    let border_style = if is_selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {}{state} ", session.title)),
        )
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!("{} left", format_clock(session.time_left)))
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_, '_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("j/k:nav | space:pause/resume | x:stop | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::FocusRun;
    use crate::tui::app::tests::{requests, service};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
        assert_eq!(scroll_offset(4, 0), 4);
    }

    #[tokio::test]
    async fn test_render_sessions() {
        let (service, _) = service();
        let mut run = FocusRun::start(&service, &requests(&["Write@10m", "Read@5m"]));
        let mut app = App::new(&mut run);
        app.toggle_selected();

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Focus sessions (1 running, 1 paused)"));
        assert!(text.contains("Read (paused)"));
        assert!(text.contains("05:00 left"));
        assert!(text.contains("Write"));
        assert!(text.contains("10:00 left"));
        assert!(text.contains("Paused: Read"));
    }
}
