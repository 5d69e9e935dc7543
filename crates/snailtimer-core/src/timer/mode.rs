use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest accepted interval length, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest accepted interval length, in minutes.
pub const MAX_MINUTES: u32 = 180;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak];

    pub fn is_work(self) -> bool {
        self == TimerMode::Work
    }

    /// Heading shown for the interval.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Session",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short",
            TimerMode::LongBreak => "long",
        };
        f.write_str(s)
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(TimerMode::Work),
            "short" | "short_break" | "short-break" => Ok(TimerMode::ShortBreak),
            "long" | "long_break" | "long-break" => Ok(TimerMode::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown mode '{other}' (expected work, short or long)"),
            }),
        }
    }
}

/// Returns true when `minutes` is an acceptable interval length.
pub fn minutes_in_range(minutes: i64) -> bool {
    (MIN_MINUTES as i64..=MAX_MINUTES as i64).contains(&minutes)
}

/// Configured length of each mode, in minutes.
///
/// Every field is kept within `MIN_MINUTES..=MAX_MINUTES` so a planned
/// countdown is never zero seconds long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDurations")]
pub struct ModeDurations {
    work_minutes: u32,
    short_break_minutes: u32,
    long_break_minutes: u32,
}

#[derive(Deserialize)]
struct RawDurations {
    work_minutes: u32,
    short_break_minutes: u32,
    long_break_minutes: u32,
}

impl TryFrom<RawDurations> for ModeDurations {
    type Error = ValidationError;

    fn try_from(raw: RawDurations) -> Result<Self, Self::Error> {
        Self::new(raw.work_minutes, raw.short_break_minutes, raw.long_break_minutes)
    }
}

impl ModeDurations {
    pub fn new(
        work_minutes: u32,
        short_break_minutes: u32,
        long_break_minutes: u32,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("work_minutes", work_minutes),
            ("short_break_minutes", short_break_minutes),
            ("long_break_minutes", long_break_minutes),
        ] {
            if !minutes_in_range(value as i64) {
                return Err(ValidationError::OutOfRange {
                    field: field.into(),
                    value: value as i64,
                    min: MIN_MINUTES as i64,
                    max: MAX_MINUTES as i64,
                });
            }
        }
        Ok(Self {
            work_minutes,
            short_break_minutes,
            long_break_minutes,
        })
    }

    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    pub fn secs_for(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode) * 60
    }

    /// Replace the work length. Out-of-range values are ignored.
    pub(crate) fn set_work_minutes(&mut self, minutes: i64) -> bool {
        if !minutes_in_range(minutes) {
            return false;
        }
        self.work_minutes = minutes as u32;
        true
    }
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}
