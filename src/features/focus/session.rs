//! Focus session records and the in-memory session store.
//!
//! A running session's remaining time is derived from the wall clock on
//! every read, so nothing needs to be decremented per tick. A paused session
//! keeps its authoritative remaining time in `remaining_duration`.

use std::collections::HashMap;

use serde::Serialize;

use super::driver::Driver;

/// One running or paused focus timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Identifier, unique among tracked sessions.
    pub id: String,
    /// Display label.
    pub title: String,
    /// Seconds remaining as of `start_timestamp` (authoritative while paused).
    pub remaining_duration: i64,
    /// Wall-clock milliseconds at which the session last (re)started.
    pub start_timestamp: i64,
    /// True while a tick driver is active.
    pub is_running: bool,
    /// Seconds the session was started with.
    pub planned_duration: i64,
}

impl Session {
    /// Create a running session.
    #[must_use]
    pub const fn new(id: String, title: String, duration_secs: i64, now_millis: i64) -> Self {
        Self {
            id,
            title,
            remaining_duration: duration_secs,
            start_timestamp: now_millis,
            is_running: true,
            planned_duration: duration_secs,
        }
    }

    /// Whole seconds elapsed since the last (re)start, truncated.
    const fn elapsed_secs(&self, now_millis: i64) -> i64 {
        let elapsed = now_millis - self.start_timestamp;
        if elapsed < 0 {
            0
        } else {
            elapsed / 1000
        }
    }

    /// Seconds left, never negative.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn time_left(&self, now_millis: i64) -> u64 {
        let left = if self.is_running {
            self.remaining_duration - self.elapsed_secs(now_millis)
        } else {
            self.remaining_duration
        };

        if left < 0 {
            0
        } else {
            left as u64
        }
    }

    /// Freeze the countdown. Returns false if already paused.
    pub fn pause(&mut self, now_millis: i64) -> bool {
        if !self.is_running {
            return false;
        }
        self.remaining_duration -= self.elapsed_secs(now_millis);
        self.is_running = false;
        true
    }

    /// Restart the countdown from the frozen value. Returns false if running.
    pub fn resume(&mut self, now_millis: i64) -> bool {
        if self.is_running {
            return false;
        }
        self.start_timestamp = now_millis;
        self.is_running = true;
        true
    }
}

/// Convert a minute count to whole seconds.
///
/// Negative, NaN, and infinite inputs yield zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn minutes_to_seconds(minutes: f64) -> i64 {
    if !minutes.is_finite() || minutes <= 0.0 {
        return 0;
    }
    let secs = (minutes * 60.0).round();
    if secs >= i64::MAX as f64 {
        i64::MAX
    } else {
        secs as i64
    }
}

struct Entry {
    session: Session,
    driver: Option<Driver>,
}

/// Sessions keyed by id, together with the tick driver of each running one.
///
/// Removing an entry or detaching its driver drops the driver, which cancels
/// the underlying task.
#[derive(Default)]
pub(crate) struct SessionStore {
    entries: HashMap<String, Entry>,
    next_epoch: u64,
}

impl SessionStore {
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.entries.get(id).map(|e| &e.session)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.entries.get_mut(id).map(|e| &mut e.session)
    }

    /// Insert a session with no driver, replacing any previous record.
    pub fn insert(&mut self, session: Session) {
        self.entries.insert(
            session.id.clone(),
            Entry {
                session,
                driver: None,
            },
        );
    }

    /// Remove a session and cancel its driver.
    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.entries.remove(id).map(|e| e.session)
    }

    /// Install a driver for `id`, cancelling any previous one.
    pub fn attach_driver(&mut self, id: &str, driver: Driver) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.driver = Some(driver);
        }
    }

    /// Cancel the driver for `id`, if any.
    pub fn detach_driver(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.driver = None;
        }
    }

    /// Whether the current driver of `id` carries `epoch`.
    pub fn is_driven_by(&self, id: &str, epoch: u64) -> bool {
        self.entries
            .get(id)
            .and_then(|e| e.driver.as_ref())
            .is_some_and(|d| d.epoch() == epoch)
    }

    /// Allocate a fresh driver epoch.
    pub fn next_epoch(&mut self) -> u64 {
        self.next_epoch += 1;
        self.next_epoch
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.entries.values().map(|e| &e.session)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
