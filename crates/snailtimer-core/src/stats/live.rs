use std::fmt::Display;

use chrono::{DateTime, Utc};

use super::FocusStats;

/// Last-known stats. A failed refresh keeps the previous value.
#[derive(Debug, Clone, Default)]
pub struct LiveStats {
    current: FocusStats,
    refreshed_at: Option<DateTime<Utc>>,
}

impl LiveStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FocusStats {
        &self.current
    }

    /// When the value last changed, `None` while still at defaults.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Replace the value on success. Returns whether it was replaced.
    pub fn refresh<E: Display>(&mut self, result: Result<FocusStats, E>) -> bool {
        match result {
            Ok(stats) => {
                self.current = stats;
                self.refreshed_at = Some(Utc::now());
                true
            }
            Err(e) => {
                tracing::warn!("failed to refresh focus stats, keeping last known: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_refresh_keeps_stale_value() {
        let mut live = LiveStats::new();
        let stats = FocusStats {
            total_focus_minutes: 25,
            completed_sessions: 1,
            ..FocusStats::default()
        };
        assert!(live.refresh::<String>(Ok(stats.clone())));
        let stamped = live.refreshed_at();
        assert!(stamped.is_some());

        assert!(!live.refresh(Err("network down")));
        assert_eq!(live.current(), &stats);
        assert_eq!(live.refreshed_at(), stamped);
    }
}
