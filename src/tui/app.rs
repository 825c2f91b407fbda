//! Application state for the dashboard.

use crate::features::focus::{FocusRun, SessionSnapshot};

/// Application state.
pub struct App<'r, 's> {
    /// The sessions being shown.
    run: &'r mut FocusRun<'s>,
    /// Sessions still running or paused, sorted by id.
    pub sessions: Vec<SessionSnapshot>,
    /// Currently selected index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
}

impl<'r, 's> App<'r, 's> {
    /// Create a new app instance.
    pub fn new(run: &'r mut FocusRun<'s>) -> Self {
        let sessions = run.snapshots();

        Self {
            run,
            sessions,
            selected: 0,
            status: Some("Press ? for help".to_string()),
            pending_g: false,
        }
    }

    /// Take queued session updates and reload the session list.
    pub fn refresh(&mut self) {
        for event in self.run.drain() {
            if event.complete {
                self.status = Some(format!("Completed: {}", event.title));
            }
        }
        self.sessions = self.run.snapshots();

        // Adjust selection if it's out of bounds
        if !self.sessions.is_empty() && self.selected >= self.sessions.len() {
            self.selected = self.sessions.len() - 1;
        }
    }

    /// Whether every session has ended.
    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    /// Get the currently selected session.
    pub fn selected_session(&self) -> Option<&SessionSnapshot> {
        self.sessions.get(self.selected)
    }

    /// Number of sessions currently counting down.
    pub fn running_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_running).count()
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.sessions.is_empty() && self.selected < self.sessions.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.sessions.is_empty() {
            self.selected = self.sessions.len() - 1;
        }
        self.pending_g = false;
    }

    /// Pause or resume the selected session.
    pub fn toggle_selected(&mut self) {
        let Some(session) = self.selected_session() else {
            return;
        };
        let id = session.id.clone();
        let title = session.title.clone();

        match self.run.toggle_pause(&id) {
            Some(true) => self.status = Some(format!("Resumed: {title}")),
            Some(false) => self.status = Some(format!("Paused: {title}")),
            None => {}
        }
        self.refresh();
    }

    /// Stop the selected session.
    pub fn stop_selected(&mut self) {
        let Some(session) = self.selected_session() else {
            return;
        };
        let id = session.id.clone();
        let title = session.title.clone();

        self.run.stop(&id);
        self.status = Some(format!("Stopped: {title}"));
        self.refresh();
    }

    /// Stop every remaining session.
    pub fn stop_all(&mut self) {
        self.run.stop_all();
        self.sessions.clear();
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            // Second 'g' - go to top
            self.select_first();
        } else {
            // First 'g' - wait for second
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        self.pending_g = false;
        self.status = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use tokio::runtime::Handle;

    use super::*;
    use crate::features::focus::{
        CompletionNotifier, DesktopNotifier, FocusService, ManualClock, Outcome, SessionRequest,
        Silence,
    };

    pub fn service() -> (FocusService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at(0));
        let service = FocusService::new(
            Handle::current(),
            clock.clone(),
            CompletionNotifier::new(Arc::new(DesktopNotifier::disabled()), Arc::new(Silence)),
        );
        (service, clock)
    }

    pub fn requests(args: &[&str]) -> Vec<SessionRequest> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        SessionRequest::parse_all(&args, Duration::minutes(25)).unwrap()
    }

    #[tokio::test]
    async fn test_new_lists_sessions_sorted() {
        let (service, _) = service();
        let mut run = FocusRun::start(&service, &requests(&["Write@10m", "Read@5m"]));
        let app = App::new(&mut run);

        let ids: Vec<&str> = app.sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["read", "write"]);
        assert_eq!(app.running_count(), 2);
        assert_eq!(app.selected_session().unwrap().time_left, 300);
    }

    #[tokio::test]
    async fn test_selection_bounds() {
        let (service, _) = service();
        let mut run = FocusRun::start(&service, &requests(&["A@1m", "B@1m"]));
        let mut app = App::new(&mut run);

        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_first();
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_toggle_selected() {
        let (service, _) = service();
        let mut run = FocusRun::start(&service, &requests(&["Write@10m"]));
        let mut app = App::new(&mut run);

        app.toggle_selected();
        assert_eq!(app.status.as_deref(), Some("Paused: Write"));
        assert_eq!(app.running_count(), 0);

        app.toggle_selected();
        assert_eq!(app.status.as_deref(), Some("Resumed: Write"));
        assert_eq!(app.running_count(), 1);
    }

    #[tokio::test]
    async fn test_stop_selected_clamps_selection() {
        let (service, _) = service();
        let mut run = FocusRun::start(&service, &requests(&["A@1m", "B@1m"]));
        {
            let mut app = App::new(&mut run);
            app.select_last();
            app.stop_selected();

            assert_eq!(app.status.as_deref(), Some("Stopped: B"));
            assert_eq!(app.sessions.len(), 1);
            assert_eq!(app.selected, 0);
            assert!(!app.is_finished());

            app.stop_all();
            assert!(app.is_finished());
        }

        let results = run.into_results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.outcome == Outcome::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_picks_up_completion() {
        let (service, clock) = service();
        let mut run = FocusRun::start(&service, &requests(&["Tea@1m", "Write@10m"]));
        let mut app = App::new(&mut run);

        clock.advance_secs(60);
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        app.refresh();

        assert_eq!(app.status.as_deref(), Some("Completed: Tea"));
        assert_eq!(app.sessions.len(), 1);
        assert_eq!(app.sessions[0].id, "write");
    }
}
