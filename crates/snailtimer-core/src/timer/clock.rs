//! Tick sources for the session timer.
//!
//! A [`Clock`] hands out a [`TickToken`] per scheduled periodic tick and
//! stops delivering it once cancelled. Tokens are never reused, so a tick
//! that was already in flight when its token was cancelled can be told
//! apart from the live one.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Period between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one scheduled periodic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickToken(u64);

impl TickToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Capability to schedule and cancel periodic ticks.
pub trait Clock {
    /// Start delivering ticks every `period` under a fresh token.
    fn schedule_tick(&mut self, period: Duration) -> TickToken;

    /// Stop delivering ticks for `token`. Unknown tokens are ignored.
    fn cancel(&mut self, token: TickToken);
}

/// Deterministic clock: the caller decides when a period has elapsed.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    live: BTreeSet<TickToken>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens due for one tick each after a period elapses.
    pub fn pending(&self) -> Vec<TickToken> {
        self.live.iter().copied().collect()
    }

    pub fn is_live(&self, token: TickToken) -> bool {
        self.live.contains(&token)
    }

    /// Total number of tokens ever issued.
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

impl Clock for ManualClock {
    fn schedule_tick(&mut self, _period: Duration) -> TickToken {
        let token = TickToken(self.next_id);
        self.next_id += 1;
        self.live.insert(token);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        self.live.remove(&token);
    }
}

/// Clock backed by tokio interval tasks.
///
/// Each scheduled token gets its own task that sends the token over the
/// channel returned by [`TokioClock::new`] once per period. Cancelling
/// aborts the task; ticks already queued in the channel are not recalled.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioClock {
    next_id: u64,
    tx: mpsc::UnboundedSender<TickToken>,
    tasks: HashMap<TickToken, JoinHandle<()>>,
}

impl TokioClock {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = Self {
            next_id: 0,
            tx,
            tasks: HashMap::new(),
        };
        (clock, rx)
    }

    /// Number of tick tasks still scheduled.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Clock for TokioClock {
    fn schedule_tick(&mut self, period: Duration) -> TickToken {
        let token = TickToken(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // Suspended hosts are not caught up; the countdown just runs late.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(token).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(token, handle);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
