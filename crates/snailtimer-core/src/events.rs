use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every state change of the timer produces an Event.
/// Front-ends render them; the recorder consumes completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ModeSelected {
        mode: TimerMode,
        planned_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Work length changed. `stopped` is set when a running countdown was
    /// force-stopped by the change.
    DurationChanged {
        work_minutes: u32,
        stopped: bool,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero while running.
    TimerCompleted {
        mode: TimerMode,
        duration_minutes: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        running: bool,
        remaining_secs: u32,
        planned_secs: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::ModeSelected { at, .. }
            | Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::DurationChanged { at, .. }
            | Event::TimerCompleted { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}
