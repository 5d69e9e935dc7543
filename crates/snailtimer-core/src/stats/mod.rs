//! Statistics module for Snail Timer
//!
//! Aggregates derived from the full session record history: totals,
//! the trailing seven-day focus chart and the consecutive-day streak.

mod focus;
mod live;

pub use focus::{recompute, FocusStats, WEEK_DAYS};
pub use live::LiveStats;
