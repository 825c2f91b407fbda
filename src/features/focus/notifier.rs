//! Completion notifications.
//!
//! When a session reaches zero the user gets a desktop notification (if
//! permitted) and a short audible cue. Both are best-effort: failures are
//! logged and never reach the timer.

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use notify_rust::Notification;

use crate::config::FocusConfig;
use crate::error::FocusError;

/// Application name shown by the notification daemon.
pub const APP_NAME: &str = "focus-keeper";

/// Whether the host lets us show notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Undecided,
    /// Notifications may be shown.
    Granted,
    /// Notifications must not be shown.
    Denied,
}

impl Permission {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Undecided => 0,
            Self::Granted => 1,
            Self::Denied => 2,
        }
    }

    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Granted,
            2 => Self::Denied,
            _ => Self::Undecided,
        }
    }
}

/// Content of a desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub icon: &'static str,
}

impl Notice {
    /// The notice shown when a session finishes.
    #[must_use]
    pub fn session_complete(session_title: &str) -> Self {
        Self {
            title: "Focus Session Complete!".to_string(),
            body: format!("\"{session_title}\" has finished. Time for a break!"),
            icon: "alarm-clock",
        }
    }
}

/// Host notification facility.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Ask for permission. Must return promptly; the outcome is picked up
    /// later through [`Notifier::permission`].
    fn request_permission(&self);

    /// Display a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses or fails to show it.
    fn show(&self, notice: &Notice) -> Result<(), FocusError>;
}

/// Host audio facility.
#[cfg_attr(test, mockall::automock)]
pub trait AudioCue: Send + Sync {
    /// Play the completion cue.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self) -> Result<(), FocusError>;
}

/// Fires the completion signal and issues the one-time permission request.
pub struct CompletionNotifier {
    notifier: Arc<dyn Notifier>,
    audio: Arc<dyn AudioCue>,
    permission_requested: AtomicBool,
}

impl CompletionNotifier {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, audio: Arc<dyn AudioCue>) -> Self {
        Self {
            notifier,
            audio,
            permission_requested: AtomicBool::new(false),
        }
    }

    /// Production wiring for the given settings.
    #[must_use]
    pub fn from_config(config: &FocusConfig) -> Self {
        let notifier: Arc<dyn Notifier> = if config.notifications {
            Arc::new(DesktopNotifier::new())
        } else {
            Arc::new(DesktopNotifier::disabled())
        };
        let audio: Arc<dyn AudioCue> = if config.notification_sound {
            Arc::new(TerminalBell)
        } else {
            Arc::new(Silence)
        };
        Self::new(notifier, audio)
    }

    /// On the first call only, request permission if it is undecided.
    pub fn ensure_permission_requested(&self) {
        if self.permission_requested.swap(true, Ordering::SeqCst) {
            return;
        }
        if self.notifier.permission() == Permission::Undecided {
            log::debug!("requesting notification permission");
            self.notifier.request_permission();
        }
    }

    /// Signal that the session titled `session_title` has finished.
    pub fn fire(&self, session_title: &str) {
        match self.notifier.permission() {
            Permission::Granted => {
                if let Err(e) = self.notifier.show(&Notice::session_complete(session_title)) {
                    log::warn!("could not show completion notification: {e}");
                }
            }
            permission => {
                log::debug!("notification skipped, permission is {permission:?}");
            }
        }

        if let Err(e) = self.audio.play() {
            log::debug!("completion cue failed: {e}");
        }
    }
}

/// Desktop notifications through the platform notification service.
pub struct DesktopNotifier {
    permission: Arc<AtomicU8>,
}

impl DesktopNotifier {
    /// A notifier whose permission is decided on first request.
    #[must_use]
    pub fn new() -> Self {
        Self::with_permission(Permission::Undecided)
    }

    /// A notifier that never shows anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_permission(Permission::Denied)
    }

    fn with_permission(permission: Permission) -> Self {
        Self {
            permission: Arc::new(AtomicU8::new(permission.to_u8())),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        Permission::from_u8(self.permission.load(Ordering::SeqCst))
    }

    fn request_permission(&self) {
        let state = Arc::clone(&self.permission);
        let spawned = std::thread::Builder::new()
            .name("notify-probe".to_string())
            .spawn(move || {
                let granted = notification_service_available();
                let permission = if granted {
                    Permission::Granted
                } else {
                    Permission::Denied
                };
                log::debug!("notification permission resolved to {permission:?}");
                state.store(permission.to_u8(), Ordering::SeqCst);
            });

        if let Err(e) = spawned {
            log::warn!("could not probe notification service: {e}");
            self.permission
                .store(Permission::Denied.to_u8(), Ordering::SeqCst);
        }
    }

    fn show(&self, notice: &Notice) -> Result<(), FocusError> {
        Notification::new()
            .appname(APP_NAME)
            .summary(&notice.title)
            .body(&notice.body)
            .icon(notice.icon)
            .show()
            .map(|_| ())
            .map_err(|e| FocusError::Notification(e.to_string()))
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn notification_service_available() -> bool {
    notify_rust::get_server_information().is_ok()
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
const fn notification_service_available() -> bool {
    true
}

/// Rings the terminal bell on stderr.
///
/// Stdout carries command output, including JSON lines, so the bell stays off it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(out: &mut impl Write) -> Result<(), FocusError> {
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

impl AudioCue for TerminalBell {
    fn play(&self) -> Result<(), FocusError> {
        Self::ring(&mut std::io::stderr())
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AudioCue for Silence {
    fn play(&self) -> Result<(), FocusError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    fn silent_audio() -> Arc<dyn AudioCue> {
        let mut audio = MockAudioCue::new();
        audio.expect_play().returning(|| Ok(()));
        Arc::new(audio)
    }

    #[test]
    fn test_notice_text() {
        let notice = Notice::session_complete("Deep Work");
        assert_eq!(notice.title, "Focus Session Complete!");
        assert!(notice.body.contains("\"Deep Work\""));
    }

    #[test]
    fn test_permission_requested_once_when_undecided() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::Undecided);
        notifier.expect_request_permission().times(1).return_const(());

        let completion = CompletionNotifier::new(Arc::new(notifier), silent_audio());
        completion.ensure_permission_requested();
        completion.ensure_permission_requested();
        completion.ensure_permission_requested();
    }

    #[test]
    fn test_permission_not_requested_when_decided() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Denied);
        notifier.expect_request_permission().never();

        let completion = CompletionNotifier::new(Arc::new(notifier), silent_audio());
        completion.ensure_permission_requested();
    }

    #[test]
    fn test_fire_shows_notice_when_granted() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier
            .expect_show()
            .with(eq(Notice::session_complete("Reading")))
            .times(1)
            .returning(|_| Ok(()));

        let mut audio = MockAudioCue::new();
        audio.expect_play().times(1).returning(|| Ok(()));

        let completion = CompletionNotifier::new(Arc::new(notifier), Arc::new(audio));
        completion.fire("Reading");
    }

    #[test]
    fn test_fire_skips_notice_without_permission() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Denied);
        notifier.expect_show().never();

        let mut audio = MockAudioCue::new();
        audio.expect_play().times(1).returning(|| Ok(()));

        let completion = CompletionNotifier::new(Arc::new(notifier), Arc::new(audio));
        completion.fire("Reading");
    }

    #[test]
    fn test_fire_swallows_failures() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier
            .expect_show()
            .times(1)
            .returning(|_| Err(FocusError::Notification("no daemon".to_string())));

        let mut audio = MockAudioCue::new();
        audio.expect_play().times(1).returning(|| {
            Err(FocusError::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "no audio",
            )))
        });

        let completion = CompletionNotifier::new(Arc::new(notifier), Arc::new(audio));
        completion.fire("Reading");
    }

    #[test]
    fn test_terminal_bell_writes_only_bel() {
        let mut out = Vec::new();
        TerminalBell::ring(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_disabled_desktop_notifier_is_denied() {
        assert_eq!(DesktopNotifier::disabled().permission(), Permission::Denied);
        assert_eq!(DesktopNotifier::new().permission(), Permission::Undecided);
    }

    #[test]
    fn test_permission_u8_round_trip() {
        for p in [Permission::Undecided, Permission::Granted, Permission::Denied] {
            assert_eq!(Permission::from_u8(p.to_u8()), p);
        }
    }

    #[test]
    fn test_silence_never_fails() {
        assert!(Silence.play().is_ok());
    }
}
