//! Completion handling: session records and notifications.
//!
//! Only Work completions are logged. Every completion notifies. A failed
//! write is reported back as a warning and never touches the timer.

use chrono::{DateTime, Utc};

use crate::storage::{NewSessionRecord, SessionRecord, SessionStore};
use crate::timer::TimerMode;

pub const FOCUS_COMPLETE_MESSAGE: &str = "Focus session complete! Take a break.";
pub const BREAK_COMPLETE_MESSAGE: &str = "Break over! Ready to focus?";

/// Fire-and-forget sink for completion alerts.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}

/// Outcome of one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub mode: TimerMode,
    pub duration_minutes: u32,
    /// The appended record, for a Work completion that was stored.
    pub record: Option<SessionRecord>,
    /// Non-blocking warning for the user when the write failed.
    pub warning: Option<String>,
}

pub struct SessionRecorder<S, N> {
    store: S,
    notifier: N,
    notifications_enabled: bool,
}

impl<S: SessionStore, N: Notifier> SessionRecorder<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            notifications_enabled: true,
        }
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Handle a countdown that reached zero in `mode`.
    pub fn on_completion(
        &mut self,
        mode: TimerMode,
        duration_minutes: u32,
        completed_at: DateTime<Utc>,
    ) -> Completion {
        let mut completion = Completion {
            mode,
            duration_minutes,
            record: None,
            warning: None,
        };

        let message = if mode.is_work() {
            match self
                .store
                .append(NewSessionRecord::focus(duration_minutes, completed_at))
            {
                Ok(record) => {
                    tracing::info!(id = record.id, minutes = duration_minutes, "focus session recorded");
                    completion.record = Some(record);
                }
                Err(e) => {
                    tracing::warn!("failed to record focus session: {e}");
                    completion.warning = Some(format!("Focus session was not saved: {e}"));
                }
            }
            FOCUS_COMPLETE_MESSAGE
        } else {
            BREAK_COMPLETE_MESSAGE
        };

        if self.notifications_enabled {
            self.notifier.notify(message);
        }
        completion
    }
}
