//! Integration tests for the focus session workflow.
//!
//! Drives a full countdown through the clock, recorder and SQLite store,
//! then reads the stats back the way the front-end does.

use std::cell::RefCell;

use chrono::{Duration, Utc};
use snailtimer_core::session::TickOutcome;
use snailtimer_core::stats::recompute;
use snailtimer_core::timer::ModeDurations;
use snailtimer_core::{
    Database, FocusSession, ManualClock, NewSessionRecord, Notifier, SessionKind, SessionRecorder,
    SessionStore, SessionTimer, TimerMode, TokioClock,
};

#[derive(Default)]
struct Alerts(RefCell<Vec<String>>);

impl Notifier for Alerts {
    fn notify(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

#[test]
fn test_full_work_session_is_recorded() {
    let db = Database::open_memory().unwrap();
    let mut session = FocusSession::new(
        SessionTimer::default(),
        ManualClock::new(),
        SessionRecorder::new(db, Alerts::default()),
    );

    session.toggle_running();
    let mut completed = 0;
    for _ in 0..1500 {
        for token in session.clock().pending() {
            if let TickOutcome::Completed(done) = session.on_tick(token) {
                completed += 1;
                assert_eq!(done.duration_minutes, 25);
                assert_eq!(done.record.as_ref().unwrap().kind, SessionKind::Focus);
            }
        }
    }
    assert_eq!(completed, 1);
    assert!(session.clock().pending().is_empty());

    let records = session.recorder().store().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duration_minutes, 25);

    let stats = session.stats().unwrap();
    assert_eq!(stats.completed_sessions, 1);
    assert_eq!(stats.total_focus_minutes, 25);
    assert_eq!(session.recorder().notifier().0.borrow().len(), 1);
}

#[test]
fn test_abandoned_session_leaves_no_record() {
    let db = Database::open_memory().unwrap();
    let mut session = FocusSession::new(
        SessionTimer::default(),
        ManualClock::new(),
        SessionRecorder::new(db, Alerts::default()),
    );

    session.toggle_running();
    for _ in 0..1499 {
        for token in session.clock().pending() {
            session.on_tick(token);
        }
    }
    assert_eq!(session.timer().remaining_secs(), 1);
    session.select_mode(TimerMode::ShortBreak);

    assert!(session.recorder().store().records().unwrap().is_empty());
    assert!(session.recorder().notifier().0.borrow().is_empty());
}

#[test]
fn test_stats_over_stored_history() {
    let mut db = Database::open_memory().unwrap();
    let now = Utc::now();
    for days_ago in [0, 1, 2, 10] {
        db.append(NewSessionRecord::focus(25, now - Duration::days(days_ago)))
            .unwrap();
    }

    let stats = recompute(&db.records().unwrap(), now);
    assert_eq!(stats.focus_streak, 3);
    assert_eq!(stats.total_focus_minutes, 100);
    assert_eq!(stats.weekly_data, [0, 0, 0, 0, 25, 25, 25]);
    assert_eq!(stats.total_sessions, 4);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_clock_drives_countdown() {
    let (clock, mut rx) = TokioClock::new();
    let mut session = FocusSession::new(
        SessionTimer::new(ModeDurations::new(1, 5, 15).unwrap()),
        clock,
        SessionRecorder::new(Database::open_memory().unwrap(), Alerts::default()),
    );

    session.toggle_running();
    let mut ticks = 0;
    while let Some(token) = rx.recv().await {
        ticks += 1;
        if let TickOutcome::Completed(done) = session.on_tick(token) {
            assert!(done.record.is_some());
            break;
        }
    }
    assert_eq!(ticks, 60);
    assert_eq!(session.clock().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_queued_tick_after_mode_switch_is_stale() {
    let (clock, mut rx) = TokioClock::new();
    let mut session = FocusSession::new(
        SessionTimer::default(),
        clock,
        SessionRecorder::new(Database::open_memory().unwrap(), Alerts::default()),
    );

    session.toggle_running();
    let queued = rx.recv().await.unwrap();
    session.select_mode(TimerMode::LongBreak);

    assert_eq!(session.on_tick(queued), TickOutcome::Stale);
    assert_eq!(session.timer().remaining_secs(), 900);
    assert_eq!(session.clock().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_session_stops_ticking() {
    let (clock, mut rx) = TokioClock::new();
    let mut session = FocusSession::new(
        SessionTimer::default(),
        clock,
        SessionRecorder::new(Database::open_memory().unwrap(), Alerts::default()),
    );

    session.toggle_running();
    assert_eq!(rx.recv().await, Some(session.live_tick().unwrap()));

    drop(session);
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());
}
