//! Focus session timekeeping.
//!
//! Provides background countdown timers for focus sessions:
//! - Start/pause/resume/stop named sessions
//! - Per-session observers fed once a second
//! - Desktop notification and audible cue on completion
//! - History of finished sessions

pub mod clock;
mod driver;
pub mod format;
pub mod history;
pub mod notifier;
mod registry;
pub mod run;
pub mod service;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::TICK_PERIOD;
pub use format::{as_minutes, format_clock, format_duration, parse_duration};
pub use history::{HistoryEntry, HistoryStore, HistoryTotals, Outcome};
pub use notifier::{
    AudioCue, CompletionNotifier, DesktopNotifier, Notice, Notifier, Permission, Silence,
    TerminalBell,
};
pub use registry::SessionCallback;
pub use run::{FocusRun, SessionEvent, SessionRequest};
pub use service::{ActiveSession, FocusService, SessionSnapshot};
pub use session::Session;
