//! Foreground runs of one or more sessions.
//!
//! A [`FocusRun`] starts a batch of sessions on a [`FocusService`], listens
//! to their observers through a channel, and keeps a record of how each one
//! ended so the caller can report and persist it.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::format::{as_minutes, parse_duration};
use super::history::{HistoryEntry, Outcome};
use super::service::{FocusService, SessionSnapshot};
use crate::error::FocusError;

/// A session to start, parsed from `Title` or `Title@Duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub id: String,
    pub title: String,
    pub duration: Duration,
}

impl SessionRequest {
    /// Parse a batch of session arguments.
    ///
    /// Arguments without `@Duration` use `default_duration`. Ids are slugs of the
    /// titles, suffixed `-2`, `-3`, ... when titles collide.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty title or an unparseable duration.
    pub fn parse_all(inputs: &[String], default_duration: Duration) -> Result<Vec<Self>, FocusError> {
        let mut requests: Vec<Self> = Vec::with_capacity(inputs.len());

        for input in inputs {
            let (title, duration) = match input.rsplit_once('@') {
                Some((title, raw)) => {
                    let duration = parse_duration(raw).ok_or_else(|| {
                        FocusError::InvalidArgument(format!("Invalid duration in '{input}': {raw}"))
                    })?;
                    (title.trim(), duration)
                }
                None => (input.trim(), default_duration),
            };

            if title.is_empty() {
                return Err(FocusError::InvalidArgument(format!(
                    "Session '{input}' has no title"
                )));
            }

            let base = slugify(title);
            let mut id = base.clone();
            let mut n = 2;
            while requests.iter().any(|r| r.id == id) {
                id = format!("{base}-{n}");
                n += 1;
            }

            requests.push(Self {
                id,
                title: title.to_string(),
                duration,
            });
        }

        Ok(requests)
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "session".to_string()
    } else {
        slug
    }
}

/// One observer notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub id: String,
    pub title: String,
    pub time_left: u64,
    pub complete: bool,
}

struct Tracked {
    title: String,
    planned_seconds: i64,
    started_at: DateTime<Utc>,
}

/// A batch of sessions running in the foreground.
pub struct FocusRun<'a> {
    service: &'a FocusService,
    events: UnboundedReceiver<SessionEvent>,
    tracked: BTreeMap<String, Tracked>,
    finished: Vec<HistoryEntry>,
}

impl<'a> FocusRun<'a> {
    /// Start every request on `service` and observe it.
    #[must_use]
    pub fn start(service: &'a FocusService, requests: &[SessionRequest]) -> Self {
        let (sender, events) = unbounded_channel();
        let mut tracked = BTreeMap::new();

        for request in requests {
            // Starting replaces any observer, so register afterwards
            service.start_session(&request.id, &request.title, as_minutes(request.duration));
            observe(service, request, sender.clone());
            tracked.insert(
                request.id.clone(),
                Tracked {
                    title: request.title.clone(),
                    planned_seconds: request.duration.num_seconds(),
                    started_at: Utc::now(),
                },
            );
        }

        Self {
            service,
            events,
            tracked,
            finished: Vec::new(),
        }
    }

    /// The service the sessions run on.
    #[must_use]
    pub const fn service(&self) -> &'a FocusService {
        self.service
    }

    /// Snapshots of the sessions still running or paused.
    #[must_use]
    pub fn snapshots(&self) -> Vec<SessionSnapshot> {
        self.service
            .sessions()
            .into_iter()
            .filter(|s| self.tracked.contains_key(&s.id))
            .collect()
    }

    /// Title of a tracked session.
    #[must_use]
    pub fn title(&self, id: &str) -> Option<&str> {
        self.tracked.get(id).map(|t| t.title.as_str())
    }

    /// Whether every session has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Wait for the next observer notification.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let event = self.events.recv().await?;
        self.handle(&event);
        Some(event)
    }

    /// Take every notification already queued, without waiting.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            self.handle(&event);
            drained.push(event);
        }
        drained
    }

    fn handle(&mut self, event: &SessionEvent) {
        if event.complete {
            self.finish(&event.id, Outcome::Completed, None);
        }
    }

    /// Pause a running session or resume a paused one.
    ///
    /// Returns the new running state, or `None` if the session has ended.
    pub fn toggle_pause(&self, id: &str) -> Option<bool> {
        if !self.tracked.contains_key(id) {
            return None;
        }
        let snapshot = self.service.snapshot(id)?;
        if snapshot.is_running {
            self.service.pause_session(id);
        } else {
            self.service.resume_session(id);
        }
        Some(self.service.is_session_active(id))
    }

    /// Stop one session early.
    ///
    /// A session that already finished is recorded as completed, even if its
    /// final notification has not been received yet.
    pub fn stop(&mut self, id: &str) {
        self.drain();
        self.stop_tracked(id);
    }

    fn stop_tracked(&mut self, id: &str) {
        if !self.tracked.contains_key(id) {
            return;
        }
        // Only completion removes a tracked session from the service
        let Some(snapshot) = self.service.snapshot(id) else {
            self.finish(id, Outcome::Completed, None);
            return;
        };
        self.service.stop_session(id);
        self.finish(id, Outcome::Stopped, Some(snapshot.time_left));
    }

    /// Stop every session still running or paused.
    pub fn stop_all(&mut self) {
        self.drain();
        let ids: Vec<String> = self.tracked.keys().cloned().collect();
        for id in ids {
            self.stop_tracked(&id);
        }
    }

    fn finish(&mut self, id: &str, outcome: Outcome, time_left: Option<u64>) {
        let Some(tracked) = self.tracked.remove(id) else {
            return;
        };

        let left = time_left.map_or(0, |t| i64::try_from(t).unwrap_or(i64::MAX));
        let focused_seconds = match outcome {
            Outcome::Completed => tracked.planned_seconds,
            Outcome::Stopped => (tracked.planned_seconds - left).max(0),
        };

        log::debug!("session {id} ended: {outcome}");
        self.finished.push(HistoryEntry {
            id: None,
            session_id: id.to_string(),
            title: tracked.title,
            planned_seconds: tracked.planned_seconds,
            focused_seconds,
            outcome,
            started_at: tracked.started_at,
            ended_at: Utc::now(),
        });
    }

    /// How every ended session finished, in the order they ended.
    #[must_use]
    pub fn into_results(self) -> Vec<HistoryEntry> {
        self.finished
    }
}

fn observe(service: &FocusService, request: &SessionRequest, sender: UnboundedSender<SessionEvent>) {
    let id = request.id.clone();
    let title = request.title.clone();
    service.on_session_update(&request.id, move |time_left, complete| {
        // The receiver is gone once the run is over
        let _ = sender.send(SessionEvent {
            id: id.clone(),
            title: title.clone(),
            time_left,
            complete,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::clock::Clock;
    use crate::features::focus::notifier::{CompletionNotifier, DesktopNotifier, Silence};
    use std::sync::Arc;
    use tokio::runtime::Handle;
    use tokio::time::Instant;

    struct PausedClock(Instant);

    impl Clock for PausedClock {
        fn now_millis(&self) -> i64 {
            i64::try_from(self.0.elapsed().as_millis()).unwrap()
        }
    }

    fn service() -> FocusService {
        FocusService::new(
            Handle::current(),
            Arc::new(PausedClock(Instant::now())),
            CompletionNotifier::new(Arc::new(DesktopNotifier::disabled()), Arc::new(Silence)),
        )
    }

    fn inputs(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_requests() {
        let requests = SessionRequest::parse_all(
            &inputs(&["Deep Work@50m", "Tea", "Deep Work@1h"]),
            Duration::minutes(25),
        )
        .unwrap();

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].id, "deep-work");
        assert_eq!(requests[0].duration, Duration::minutes(50));
        assert_eq!(requests[1].id, "tea");
        assert_eq!(requests[1].duration, Duration::minutes(25));
        assert_eq!(requests[2].id, "deep-work-2");
        assert_eq!(requests[2].title, "Deep Work");
    }

    #[test]
    fn test_parse_requests_rejects_bad_input() {
        assert!(SessionRequest::parse_all(&inputs(&["@25m"]), Duration::minutes(25)).is_err());
        assert!(SessionRequest::parse_all(&inputs(&["Read@soon"]), Duration::minutes(25)).is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Deep Work"), "deep-work");
        assert_eq!(slugify("  Email -- triage!! "), "email-triage");
        assert_eq!(slugify("日本語"), "session");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_records_completion() {
        let service = service();
        let requests =
            SessionRequest::parse_all(&inputs(&["Tea@3s"]), Duration::minutes(25)).unwrap();
        let mut run = FocusRun::start(&service, &requests);
        assert_eq!(run.title("tea"), Some("Tea"));

        let mut last = None;
        while !run.is_finished() {
            last = run.next_event().await;
        }
        assert_eq!(
            last,
            Some(SessionEvent {
                id: "tea".to_string(),
                title: "Tea".to_string(),
                time_left: 0,
                complete: true,
            })
        );

        let results = run.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, Outcome::Completed);
        assert_eq!(results[0].focused_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stop_and_pause() {
        let service = service();
        let requests = SessionRequest::parse_all(
            &inputs(&["Write@10m", "Read@10m"]),
            Duration::minutes(25),
        )
        .unwrap();
        let mut run = FocusRun::start(&service, &requests);

        tokio::time::sleep(std::time::Duration::from_millis(30_500)).await;
        assert_eq!(run.drain().len(), 60);

        assert_eq!(run.toggle_pause("read"), Some(false));
        assert_eq!(run.snapshots().len(), 2);
        assert_eq!(run.toggle_pause("read"), Some(true));

        run.stop("write");
        assert_eq!(run.toggle_pause("write"), None);
        run.stop_all();
        assert!(run.is_finished());
        assert!(service.sessions().is_empty());

        let results = run.into_results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.outcome == Outcome::Stopped));
        assert!(results.iter().all(|r| r.focused_seconds == 30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_unread_completion_records_completed() {
        let service = service();
        let requests =
            SessionRequest::parse_all(&inputs(&["Tea@3s", "Read@10m"]), Duration::minutes(25))
                .unwrap();
        let mut run = FocusRun::start(&service, &requests);

        tokio::time::sleep(std::time::Duration::from_millis(3_500)).await;
        run.stop_all();
        assert!(run.is_finished());

        let results = run.into_results();
        let tea = results.iter().find(|r| r.session_id == "tea").unwrap();
        assert_eq!(tea.outcome, Outcome::Completed);
        assert_eq!(tea.focused_seconds, 3);
        let read = results.iter().find(|r| r.session_id == "read").unwrap();
        assert_eq!(read.outcome, Outcome::Stopped);
        assert_eq!(read.focused_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_single_finished_session() {
        let service = service();
        let requests =
            SessionRequest::parse_all(&inputs(&["Tea@2s"]), Duration::minutes(25)).unwrap();
        let mut run = FocusRun::start(&service, &requests);

        tokio::time::sleep(std::time::Duration::from_millis(2_500)).await;
        assert!(service.snapshot("tea").is_none());
        run.stop("tea");

        let results = run.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, Outcome::Completed);
        assert_eq!(results[0].focused_seconds, 2);
    }
}
