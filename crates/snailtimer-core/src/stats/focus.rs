//! Focus statistics aggregation.
//!
//! [`recompute`] is a pure function of the record set and "now". Records
//! are bucketed by calendar date in the timezone of `now`, so the same
//! history can be read in the user's local time or in UTC.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::storage::{SessionKind, SessionRecord};

/// Length of the trailing focus chart.
pub const WEEK_DAYS: usize = 7;

/// Aggregates shown next to the timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStats {
    pub total_focus_minutes: u64,
    pub total_break_minutes: u64,
    /// Every record, whatever its kind.
    pub total_sessions: u64,
    /// Focus records only.
    pub completed_sessions: u64,
    /// Focus minutes per day; index 0 is six days ago, index 6 is today.
    pub weekly_data: [u64; WEEK_DAYS],
    /// Consecutive days with focus, ending today or yesterday.
    pub focus_streak: u32,
}

/// Derive [`FocusStats`] from `records` as seen at `now`.
///
/// The result does not depend on the order of `records`.
pub fn recompute<Tz: TimeZone>(records: &[SessionRecord], now: DateTime<Tz>) -> FocusStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut stats = FocusStats::default();
    let mut focus_days = BTreeSet::new();

    for record in records {
        let minutes = u64::from(record.duration_minutes);
        stats.total_sessions += 1;
        match record.kind {
            SessionKind::Break => stats.total_break_minutes += minutes,
            SessionKind::Focus => {
                stats.total_focus_minutes += minutes;
                stats.completed_sessions += 1;

                let day = record.completed_at.with_timezone(&tz).date_naive();
                focus_days.insert(day);

                let days_ago = (today - day).num_days();
                if (0..WEEK_DAYS as i64).contains(&days_ago) {
                    stats.weekly_data[WEEK_DAYS - 1 - days_ago as usize] += minutes;
                }
            }
        }
    }

    stats.focus_streak = streak(&focus_days, today);
    stats
}

fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);
    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut count = 0;
    while days.contains(&cursor) {
        count += 1;
        cursor -= Duration::days(1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 18, 15, 0, 0).unwrap()
    }

    fn focus(id: i64, minutes: u32, days_ago: i64) -> SessionRecord {
        SessionRecord {
            id,
            kind: SessionKind::Focus,
            duration_minutes: minutes,
            completed_at: now() - Duration::days(days_ago),
        }
    }

    fn rest(id: i64, minutes: u32, days_ago: i64) -> SessionRecord {
        SessionRecord {
            kind: SessionKind::Break,
            ..focus(id, minutes, days_ago)
        }
    }

    #[test]
    fn empty_history() {
        let stats = recompute(&[], now());
        assert_eq!(stats, FocusStats::default());
    }

    #[test]
    fn totals_split_by_kind() {
        let records = [focus(1, 25, 0), focus(2, 50, 3), rest(3, 5, 0)];
        let stats = recompute(&records, now());
        assert_eq!(stats.total_focus_minutes, 75);
        assert_eq!(stats.total_break_minutes, 5);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.completed_sessions, 2);
    }

    #[test]
    fn weekly_buckets_by_day() {
        let records = [focus(1, 25, 0), focus(2, 25, 0), focus(3, 30, 1), focus(4, 45, 6)];
        let stats = recompute(&records, now());
        assert_eq!(stats.weekly_data, [45, 0, 0, 0, 0, 30, 50]);
    }

    #[test]
    fn old_record_counts_in_totals_only() {
        let stats = recompute(&[focus(1, 25, 10)], now());
        assert_eq!(stats.weekly_data, [0; WEEK_DAYS]);
        assert_eq!(stats.total_focus_minutes, 25);
        assert_eq!(stats.focus_streak, 0);
    }

    #[test]
    fn seven_days_ago_is_outside_window() {
        let stats = recompute(&[focus(1, 25, 7)], now());
        assert_eq!(stats.weekly_data, [0; WEEK_DAYS]);
    }

    #[test]
    fn future_record_outside_window() {
        let stats = recompute(&[focus(1, 25, -1)], now());
        assert_eq!(stats.weekly_data, [0; WEEK_DAYS]);
        assert_eq!(stats.total_focus_minutes, 25);
    }

    #[test]
    fn break_records_not_in_chart_or_streak() {
        let stats = recompute(&[rest(1, 5, 0)], now());
        assert_eq!(stats.weekly_data, [0; WEEK_DAYS]);
        assert_eq!(stats.focus_streak, 0);
    }

    #[test]
    fn streak_two_days_ending_today() {
        let stats = recompute(&[focus(1, 25, 0), focus(2, 25, 1)], now());
        assert_eq!(stats.focus_streak, 2);
    }

    #[test]
    fn streak_alive_from_yesterday() {
        let stats = recompute(&[focus(1, 25, 1)], now());
        assert_eq!(stats.focus_streak, 1);
    }

    #[test]
    fn streak_broken_two_days_ago() {
        let stats = recompute(&[focus(1, 25, 2), focus(2, 25, 3)], now());
        assert_eq!(stats.focus_streak, 0);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let records = [focus(1, 25, 0), focus(2, 25, 1), focus(3, 25, 3), focus(4, 25, 4)];
        assert_eq!(recompute(&records, now()).focus_streak, 2);
    }

    #[test]
    fn streak_counts_days_not_sessions() {
        let records = [focus(1, 25, 1), focus(2, 25, 1), focus(3, 25, 2)];
        assert_eq!(recompute(&records, now()).focus_streak, 2);
    }

    #[test]
    fn dates_follow_timezone_of_now() {
        // 23:30 UTC on the 17th is already the 18th at UTC+2.
        let record = SessionRecord {
            id: 1,
            kind: SessionKind::Focus,
            duration_minutes: 25,
            completed_at: Utc.with_ymd_and_hms(2026, 3, 17, 23, 30, 0).unwrap(),
        };
        let utc = recompute(std::slice::from_ref(&record), now());
        assert_eq!(utc.weekly_data[5], 25);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = recompute(&[record], now().with_timezone(&plus_two));
        assert_eq!(local.weekly_data[6], 25);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(recompute(&[focus(1, 25, 0)], now())).unwrap();
        assert_eq!(json["totalFocusMinutes"], 25);
        assert_eq!(json["completedSessions"], 1);
        assert_eq!(json["focusStreak"], 1);
        assert_eq!(json["weeklyData"].as_array().unwrap().len(), 7);
    }

    fn arb_record() -> impl Strategy<Value = SessionRecord> {
        (any::<bool>(), 1u32..=180, -2i64..30, 0i64..86_400).prop_map(
            |(is_focus, minutes, days_ago, secs)| SessionRecord {
                id: 0,
                kind: if is_focus {
                    SessionKind::Focus
                } else {
                    SessionKind::Break
                },
                duration_minutes: minutes,
                completed_at: now() - Duration::days(days_ago) - Duration::seconds(secs),
            },
        )
    }

    proptest! {
        #[test]
        fn order_independent(
            (records, shuffled) in prop::collection::vec(arb_record(), 0..40)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(recompute(&records, now()), recompute(&shuffled, now()));
        }

        #[test]
        fn idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
            let first = recompute(&records, now());
            prop_assert_eq!(first.clone(), recompute(&records, now()));
            let weekly: u64 = first.weekly_data.iter().sum();
            prop_assert!(weekly <= first.total_focus_minutes);
            prop_assert!(first.completed_sessions <= first.total_sessions);
        }
    }
}
