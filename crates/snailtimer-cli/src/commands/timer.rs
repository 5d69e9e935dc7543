use std::io::Write;

use clap::Subcommand;
use snailtimer_core::session::TickOutcome;
use snailtimer_core::timer::{MAX_MINUTES, MIN_MINUTES};
use snailtimer_core::timer::format_clock;
use snailtimer_core::{
    Config, Database, Event, FocusSession, LiveStats, NewSessionRecord, SessionRecorder,
    SessionTimer, TimerMode, TokioClock,
};
use tokio::task::JoinHandle;

use super::stats::print_summary;
use crate::notify::TerminalNotifier;
use crate::remote;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the foreground (Ctrl-C abandons it)
    Run {
        /// Mode: work, short or long
        #[arg(long, default_value = "work")]
        mode: TimerMode,
        /// Custom work length in minutes
        #[arg(long, value_parser = clap::value_parser!(i64).range(MIN_MINUTES as i64..=MAX_MINUTES as i64))]
        minutes: Option<i64>,
    },
    /// Record a completed focus session now
    Record {
        /// Length in minutes (default: configured work length)
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_MINUTES as i64..=MAX_MINUTES as i64))]
        minutes: Option<u32>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        TimerAction::Run { mode, minutes } => {
            if minutes.is_some() && !mode.is_work() {
                return Err("--minutes only applies to work mode".into());
            }
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_countdown(&config, mode, minutes))?;
        }
        TimerAction::Record { minutes } => {
            let minutes = minutes.unwrap_or(config.timer.work_minutes);
            let db = Database::open()?;
            let record = db.append_record(&NewSessionRecord::focus(minutes, chrono::Utc::now()))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}

async fn run_countdown(
    config: &Config,
    mode: TimerMode,
    minutes: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = remote::client(config)?;
    let recorder = SessionRecorder::new(
        Database::open()?,
        TerminalNotifier::new(config.notifications.sound),
    )
    .with_notifications(config.notifications.enabled);
    let (clock, mut ticks) = TokioClock::new();
    let mut session = FocusSession::new(SessionTimer::new(config.mode_durations()), clock, recorder);

    trace_event(session.select_mode(mode));
    if let Some(minutes) = minutes {
        trace_event(session.set_custom_work_minutes(minutes));
    }
    trace_event(session.toggle_running());
    print_progress(session.timer());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut upload: Option<JoinHandle<()>> = None;
    loop {
        tokio::select! {
            Some(token) = ticks.recv() => match session.on_tick(token) {
                TickOutcome::Stale => {}
                TickOutcome::Counted { .. } => print_progress(session.timer()),
                TickOutcome::Completed(done) => {
                    print_progress(session.timer());
                    println!();
                    if let Some(warning) = &done.warning {
                        eprintln!("warning: {warning}");
                    }
                    if let (Some(api), true) = (api.clone(), done.mode.is_work()) {
                        let minutes = done.duration_minutes;
                        upload = Some(tokio::spawn(async move {
                            if let Err(e) = api.post_record(minutes).await {
                                tracing::warn!("failed to upload focus session: {e}");
                            }
                        }));
                    }
                    break;
                }
            },
            _ = &mut ctrl_c => {
                session.abandon();
                println!();
                eprintln!("Session abandoned; nothing recorded.");
                return Ok(());
            }
        }
    }

    let mut stats = LiveStats::new();
    stats.refresh(session.stats());
    print_summary(stats.current());

    if let Some(upload) = upload {
        // Reqwest's own timeout bounds this wait.
        let _ = upload.await;
    }
    Ok(())
}

fn trace_event(event: Option<Event>) {
    if let Some(event) = event {
        tracing::debug!(at = %event.at(), "{event:?}");
    }
}

fn print_progress(timer: &SessionTimer) {
    let Event::StateSnapshot {
        mode,
        remaining_secs,
        progress_pct,
        ..
    } = timer.snapshot()
    else {
        return;
    };
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        "\r{:<13} {}  {:>3.0}%",
        mode.label(),
        format_clock(remaining_secs),
        progress_pct
    );
    let _ = out.flush();
}
