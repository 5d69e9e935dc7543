//! # Snail Timer Core Library
//!
//! This library provides the focus session engine behind Snail Timer.
//! The CLI binary is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer**: A pure countdown state machine for work, short-break and
//!   long-break intervals, plus the `Clock` capability that delivers ticks
//! - **Session**: The driver that owns the timer, its single live tick
//!   token, and the recorder
//! - **Recorder**: Turns completion events into session records and
//!   notifications
//! - **Stats**: Totals, trailing-week buckets and day streaks derived from
//!   the full record history
//! - **Storage**: SQLite record store, TOML configuration
//! - **API**: HTTP client for the remote session-record service
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Countdown state machine
//! - [`FocusSession`]: Clock-driven session with stale-tick protection
//! - [`SessionRecorder`]: Completion handling
//! - [`stats::recompute`]: Aggregate statistics
//! - [`TaskList`]: Ordered task collection

pub mod api;
pub mod error;
pub mod events;
pub mod recorder;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use api::{ApiClient, User};
pub use error::{ApiError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use recorder::{Completion, Notifier, SessionRecorder};
pub use session::FocusSession;
pub use stats::{FocusStats, LiveStats};
pub use storage::{
    Config, Database, MemoryStore, NewSessionRecord, SessionKind, SessionRecord, SessionStore,
};
pub use task::{Task, TaskList};
pub use timer::{Clock, ManualClock, SessionTimer, TickToken, TimerMode, TokioClock};
