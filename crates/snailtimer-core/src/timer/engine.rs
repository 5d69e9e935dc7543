//! Session timer implementation.
//!
//! The session timer is a pure countdown state machine. It owns no clock
//! and no thread - the driver calls `tick()` once per elapsed second while
//! the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle(mode) <-> Running(mode) -> (zero) -> Idle(mode, remaining 0)
//! any --select_mode--> Idle(new mode, full length)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(ModeDurations::default());
//! timer.toggle_running();
//! // Once per second:
//! timer.tick(); // Returns Some(Event::TimerCompleted) when the countdown hits zero
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{ModeDurations, TimerMode};
use crate::error::ValidationError;
use crate::events::Event;

/// Countdown state machine for one active session.
///
/// Invariant: `remaining_secs <= planned_secs` and `planned_secs > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TimerParts")]
pub struct SessionTimer {
    durations: ModeDurations,
    mode: TimerMode,
    planned_secs: u32,
    remaining_secs: u32,
    running: bool,
}

#[derive(Deserialize)]
struct TimerParts {
    durations: ModeDurations,
    mode: TimerMode,
    planned_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl TryFrom<TimerParts> for SessionTimer {
    type Error = ValidationError;

    fn try_from(parts: TimerParts) -> Result<Self, Self::Error> {
        let expected = parts.durations.secs_for(parts.mode);
        if parts.planned_secs != expected {
            return Err(ValidationError::InvalidValue {
                field: "planned_secs".into(),
                message: format!(
                    "{} does not match the {} length of {expected}",
                    parts.planned_secs, parts.mode
                ),
            });
        }
        if parts.remaining_secs > parts.planned_secs {
            return Err(ValidationError::OutOfRange {
                field: "remaining_secs".into(),
                value: parts.remaining_secs as i64,
                min: 0,
                max: parts.planned_secs as i64,
            });
        }
        Ok(Self {
            durations: parts.durations,
            mode: parts.mode,
            planned_secs: parts.planned_secs,
            remaining_secs: parts.remaining_secs,
            running: parts.running && parts.remaining_secs > 0,
        })
    }
}

impl SessionTimer {
    /// Create a timer in Work mode, stopped, with the full work length.
    pub fn new(durations: ModeDurations) -> Self {
        let planned_secs = durations.secs_for(TimerMode::Work);
        Self {
            durations,
            mode: TimerMode::Work,
            planned_secs,
            remaining_secs: planned_secs,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn planned_secs(&self) -> u32 {
        self.planned_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> &ModeDurations {
        &self.durations
    }

    /// 0.0 .. 100.0 progress within the current countdown.
    pub fn progress_pct(&self) -> f64 {
        if self.planned_secs == 0 {
            return 0.0;
        }
        let elapsed = self.planned_secs.saturating_sub(self.remaining_secs);
        elapsed as f64 / self.planned_secs as f64 * 100.0
    }

    /// Remaining time as `MM:SS`. Minutes are not wrapped at 60.
    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            running: self.running,
            remaining_secs: self.remaining_secs,
            planned_secs: self.planned_secs,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to `mode` with a fresh full-length countdown, stopped.
    ///
    /// Any countdown in progress is abandoned without completing.
    pub fn select_mode(&mut self, mode: TimerMode) -> Option<Event> {
        self.mode = mode;
        self.reset_countdown();
        Some(Event::ModeSelected {
            mode,
            planned_secs: self.planned_secs,
            at: Utc::now(),
        })
    }

    /// Start or pause. Starting an exhausted countdown does nothing.
    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.running {
            self.running = false;
            return Some(Event::TimerPaused {
                mode: self.mode,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        if self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance by one second. Returns `Some(Event::TimerCompleted)` on the
    /// tick that reaches zero; never again for the same countdown.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            self.running = false;
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        Some(Event::TimerCompleted {
            mode: self.mode,
            duration_minutes: self.planned_secs / 60,
            at: Utc::now(),
        })
    }

    /// Change the work length. Values outside 1..=180 minutes are ignored.
    ///
    /// In Work mode the countdown restarts at the new length and a running
    /// timer is stopped. In a break mode the length applies the next time
    /// Work is selected.
    pub fn set_custom_work_minutes(&mut self, minutes: i64) -> Option<Event> {
        if !self.durations.set_work_minutes(minutes) {
            return None;
        }
        let work_minutes = self.durations.minutes_for(TimerMode::Work);
        let mut stopped = false;
        if self.mode.is_work() {
            stopped = self.running;
            self.reset_countdown();
        }
        Some(Event::DurationChanged {
            work_minutes,
            stopped,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset_countdown(&mut self) {
        self.planned_secs = self.durations.secs_for(self.mode);
        self.remaining_secs = self.planned_secs;
        self.running = false;
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(ModeDurations::default())
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
