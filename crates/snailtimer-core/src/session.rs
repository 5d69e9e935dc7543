//! Clock-driven focus session.
//!
//! [`FocusSession`] ties a [`SessionTimer`] to a [`Clock`] and a
//! [`SessionRecorder`]. It holds at most one live tick token: the previous
//! token is cancelled before any transition that stops or resets the
//! countdown, and ticks carrying any other token are dropped.

use crate::events::Event;
use crate::recorder::{Completion, Notifier, SessionRecorder};
use crate::stats::{self, FocusStats};
use crate::storage::SessionStore;
use crate::timer::{Clock, SessionTimer, TickToken, TimerMode, TICK_PERIOD};

/// Result of delivering one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The token was not the live one; nothing changed.
    Stale,
    /// The countdown moved by one second.
    Counted { remaining_secs: u32 },
    /// The countdown reached zero.
    Completed(Completion),
}

pub struct FocusSession<C: Clock, S: SessionStore, N: Notifier> {
    timer: SessionTimer,
    clock: C,
    live_tick: Option<TickToken>,
    recorder: SessionRecorder<S, N>,
}

impl<C: Clock, S: SessionStore, N: Notifier> FocusSession<C, S, N> {
    pub fn new(timer: SessionTimer, clock: C, recorder: SessionRecorder<S, N>) -> Self {
        Self {
            timer,
            clock,
            live_tick: None,
            recorder,
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn recorder(&self) -> &SessionRecorder<S, N> {
        &self.recorder
    }

    pub fn live_tick(&self) -> Option<TickToken> {
        self.live_tick
    }

    pub fn select_mode(&mut self, mode: TimerMode) -> Option<Event> {
        self.stop_ticks();
        self.timer.select_mode(mode)
    }

    pub fn toggle_running(&mut self) -> Option<Event> {
        self.stop_ticks();
        let event = self.timer.toggle_running();
        if self.timer.is_running() {
            self.live_tick = Some(self.clock.schedule_tick(TICK_PERIOD));
        }
        event
    }

    pub fn set_custom_work_minutes(&mut self, minutes: i64) -> Option<Event> {
        let event = self.timer.set_custom_work_minutes(minutes);
        if !self.timer.is_running() {
            self.stop_ticks();
        }
        event
    }

    /// Apply a tick delivered by the clock.
    pub fn on_tick(&mut self, token: TickToken) -> TickOutcome {
        if self.live_tick != Some(token) {
            tracing::debug!(token = token.id(), "dropping stale tick");
            return TickOutcome::Stale;
        }

        match self.timer.tick() {
            Some(Event::TimerCompleted {
                mode,
                duration_minutes,
                at,
            }) => {
                self.stop_ticks();
                TickOutcome::Completed(self.recorder.on_completion(mode, duration_minutes, at))
            }
            _ => {
                if !self.timer.is_running() {
                    self.stop_ticks();
                }
                TickOutcome::Counted {
                    remaining_secs: self.timer.remaining_secs(),
                }
            }
        }
    }

    /// Stop the countdown without recording anything.
    pub fn abandon(&mut self) {
        self.stop_ticks();
        if self.timer.is_running() {
            self.timer.toggle_running();
        }
    }

    /// Recompute stats from the store as of now.
    pub fn stats(&self) -> crate::error::Result<FocusStats> {
        let records = self.recorder.store().records()?;
        Ok(stats::recompute(&records, chrono::Local::now()))
    }

    fn stop_ticks(&mut self) {
        if let Some(token) = self.live_tick.take() {
            self.clock.cancel(token);
        }
    }
}

impl<C: Clock, S: SessionStore, N: Notifier> Drop for FocusSession<C, S, N> {
    fn drop(&mut self) {
        self.stop_ticks();
    }
}
