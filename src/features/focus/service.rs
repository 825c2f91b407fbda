//! The focus session service.
//!
//! One [`FocusService`] is built at startup and borrowed by everything that
//! needs timers. It owns every session record, its tick driver, and its
//! observer; nothing else can reach them except through the methods below.
//!
//! All operations are synchronous. Starting or resuming spawns a driver task
//! on the runtime handle given at construction; pausing, stopping and
//! completion drop it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::runtime::Handle;

use super::clock::{Clock, SystemClock};
use super::driver::{Driver, Tick, TickOutcome};
use super::notifier::CompletionNotifier;
use super::registry::{CallbackRegistry, SessionCallback};
use super::session::{minutes_to_seconds, Session, SessionStore};
use crate::config::FocusConfig;

/// A running session as listed by [`FocusService::get_all_active_sessions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSession {
    pub id: String,
    pub title: String,
    pub time_left: u64,
}

/// Point-in-time view of any tracked session, running or paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub title: String,
    pub time_left: u64,
    pub planned: u64,
    pub is_running: bool,
}

impl SessionSnapshot {
    fn of(session: &Session, now_millis: i64) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            time_left: session.time_left(now_millis),
            planned: u64::try_from(session.planned_duration).unwrap_or(0),
            is_running: session.is_running,
        }
    }

    /// Fraction of the plan already used, 0.0 to 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.planned == 0 {
            return 1.0;
        }
        1.0 - (self.time_left as f64 / self.planned as f64)
    }
}

#[derive(Default)]
struct State {
    sessions: SessionStore,
    callbacks: CallbackRegistry,
}

struct Inner {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    completion: CompletionNotifier,
    runtime: Handle,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tick for Inner {
    fn tick(&self, id: &str, epoch: u64) -> TickOutcome {
        let now = self.clock.now_millis();

        let (time_left, callback, finished) = {
            let mut state = self.lock();
            if !state.sessions.is_driven_by(id, epoch) {
                return TickOutcome::Stop;
            }
            let Some(time_left) = state.sessions.get(id).map(|s| s.time_left(now)) else {
                return TickOutcome::Stop;
            };

            if time_left > 0 {
                (time_left, state.callbacks.get(id), None)
            } else {
                // Completion and cleanup are decided under the same lock,
                // so a session can only finish once.
                let callback = state.callbacks.remove(id);
                (0, callback, state.sessions.remove(id))
            }
        };

        if let Some(callback) = callback {
            callback(time_left, finished.is_some());
        }

        match finished {
            Some(session) => {
                log::info!("session {} ({}) complete", session.id, session.title);
                self.completion.fire(&session.title);
                TickOutcome::Stop
            }
            None => TickOutcome::Continue,
        }
    }
}

/// Tracks named countdown timers and notifies when they finish.
pub struct FocusService {
    inner: Arc<Inner>,
}

impl FocusService {
    /// Create the service.
    ///
    /// Drivers are spawned on `runtime`; `clock` supplies wall-clock time.
    #[must_use]
    pub fn new(runtime: Handle, clock: Arc<dyn Clock>, completion: CompletionNotifier) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                clock,
                completion,
                runtime,
            }),
        }
    }

    /// Create the service with the system clock and desktop notifications
    /// configured by `config`.
    #[must_use]
    pub fn from_config(runtime: Handle, config: &FocusConfig) -> Self {
        Self::new(
            runtime,
            Arc::new(SystemClock),
            CompletionNotifier::from_config(config),
        )
    }

    /// Start a countdown of `duration_minutes` for `id`.
    ///
    /// An existing session with the same id is stopped first, observer
    /// included.
    pub fn start_session(&self, id: &str, title: &str, duration_minutes: f64) {
        self.inner.completion.ensure_permission_requested();

        let now = self.inner.clock.now_millis();
        let seconds = minutes_to_seconds(duration_minutes);

        let mut state = self.inner.lock();
        if state.sessions.remove(id).is_some() {
            state.callbacks.remove(id);
            log::debug!("restarting session {id}");
        }

        state
            .sessions
            .insert(Session::new(id.to_string(), title.to_string(), seconds, now));
        self.schedule(&mut state, id);

        log::debug!(
            "started session {id} ({title}) for {seconds}s, {} tracked",
            state.sessions.len()
        );
    }

    /// Freeze the countdown of `id`. No-op if unknown or already paused.
    pub fn pause_session(&self, id: &str) {
        let now = self.inner.clock.now_millis();

        let mut state = self.inner.lock();
        let Some(session) = state.sessions.get_mut(id) else {
            return;
        };
        if !session.pause(now) {
            return;
        }
        let remaining = session.remaining_duration;
        state.sessions.detach_driver(id);

        log::debug!("paused session {id} with {remaining}s left");
    }

    /// Continue a paused countdown. No-op if unknown or running.
    pub fn resume_session(&self, id: &str) {
        let now = self.inner.clock.now_millis();

        let mut state = self.inner.lock();
        let Some(session) = state.sessions.get_mut(id) else {
            return;
        };
        if !session.resume(now) {
            return;
        }
        self.schedule(&mut state, id);

        log::debug!("resumed session {id}");
    }

    /// Cancel `id` and forget it and its observer. Idempotent.
    pub fn stop_session(&self, id: &str) {
        let mut state = self.inner.lock();
        state.callbacks.remove(id);
        if state.sessions.remove(id).is_some() {
            log::debug!("stopped session {id}");
        }
    }

    /// Seconds left for `id`, or `None` if it is not tracked.
    #[must_use]
    pub fn time_left(&self, id: &str) -> Option<u64> {
        let now = self.inner.clock.now_millis();
        self.inner
            .lock()
            .sessions
            .get(id)
            .map(|s| s.time_left(now))
    }

    /// Seconds left for `id`, zero if it is not tracked.
    #[must_use]
    pub fn get_time_left(&self, id: &str) -> u64 {
        self.time_left(id).unwrap_or(0)
    }

    /// Whether `id` is currently counting down.
    #[must_use]
    pub fn is_session_active(&self, id: &str) -> bool {
        self.inner
            .lock()
            .sessions
            .get(id)
            .is_some_and(|s| s.is_running)
    }

    /// Register the observer for `id`, replacing any earlier one.
    ///
    /// The id does not have to exist yet; the observer fires once a driver
    /// ticks for it.
    ///
    /// Observers run outside the service lock, so on a multi-threaded
    /// runtime one last `(time_left, false)` update may still arrive just
    /// after [`stop_session`](Self::stop_session) or
    /// [`pause_session`](Self::pause_session) returns.
    pub fn on_session_update<F>(&self, id: &str, callback: F)
    where
        F: Fn(u64, bool) + Send + Sync + 'static,
    {
        let callback: SessionCallback = Arc::new(callback);
        if self.inner.lock().callbacks.register(id, callback) {
            log::debug!("replaced observer for session {id}");
        }
    }

    /// All running sessions, ordered by id.
    #[must_use]
    pub fn get_all_active_sessions(&self) -> Vec<ActiveSession> {
        let now = self.inner.clock.now_millis();
        let state = self.inner.lock();

        let mut active: Vec<ActiveSession> = state
            .sessions
            .iter()
            .filter(|s| s.is_running)
            .map(|s| ActiveSession {
                id: s.id.clone(),
                title: s.title.clone(),
                time_left: s.time_left(now),
            })
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        active
    }

    /// Every tracked session, running or paused, ordered by id.
    #[must_use]
    pub fn sessions(&self) -> Vec<SessionSnapshot> {
        let now = self.inner.clock.now_millis();
        let state = self.inner.lock();

        let mut all: Vec<SessionSnapshot> = state
            .sessions
            .iter()
            .map(|s| SessionSnapshot::of(s, now))
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Snapshot of a single session.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> Option<SessionSnapshot> {
        let now = self.inner.clock.now_millis();
        self.inner
            .lock()
            .sessions
            .get(id)
            .map(|s| SessionSnapshot::of(s, now))
    }

    fn schedule(&self, state: &mut State, id: &str) {
        let epoch = state.sessions.next_epoch();
        let driver = Driver::spawn(
            &self.inner.runtime,
            Arc::downgrade(&self.inner),
            id.to_string(),
            epoch,
        );
        state.sessions.attach_driver(id, driver);
    }
}
