mod clock;
mod engine;
mod mode;

pub use clock::{Clock, ManualClock, TickToken, TokioClock, TICK_PERIOD};
pub use engine::{format_clock, SessionTimer};
pub use mode::{
    minutes_in_range, ModeDurations, TimerMode, DEFAULT_LONG_BREAK_MINUTES,
    DEFAULT_SHORT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, MAX_MINUTES, MIN_MINUTES,
};
