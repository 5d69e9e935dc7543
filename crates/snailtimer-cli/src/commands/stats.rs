use chrono::{Duration, Local};
use clap::Subcommand;
use snailtimer_core::stats::{recompute, WEEK_DAYS};
use snailtimer_core::{Config, Database, FocusStats, LiveStats, SessionStore};

use crate::remote;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Stats computed from the local session history
    Show {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Stats reported by the remote service for the signed-in user
    /// (falls back to local when the fetch fails)
    Remote {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut stats = LiveStats::new();
    stats.refresh(db.records().map(|records| recompute(&records, Local::now())));

    let (json, remote_at) = match action {
        StatsAction::Show { json } => (json, None),
        StatsAction::Remote { json } => {
            let api = remote::require_client(&Config::load_or_default())?;
            let rt = tokio::runtime::Runtime::new()?;
            if rt.block_on(api.current_user())?.is_none() {
                println!("not signed in");
                return Ok(());
            }
            let remote_at = if stats.refresh(rt.block_on(api.fetch_stats())) {
                stats.refreshed_at()
            } else {
                eprintln!("warning: remote stats unavailable, showing local history");
                None
            };
            (json, remote_at)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(stats.current())?);
    } else {
        print_summary(stats.current());
        if let Some(at) = remote_at {
            println!("Remote stats as of {}", at.with_timezone(&Local).format("%H:%M:%S"));
        }
    }
    Ok(())
}

/// Human-readable stats block.
pub fn print_summary(stats: &FocusStats) {
    println!(
        "Focus: {} min in {} sessions | Breaks: {} min | Streak: {} day{}",
        stats.total_focus_minutes,
        stats.completed_sessions,
        stats.total_break_minutes,
        stats.focus_streak,
        if stats.focus_streak == 1 { "" } else { "s" }
    );

    let today = Local::now().date_naive();
    let peak = stats.weekly_data.iter().copied().max().unwrap_or(0).max(1);
    for (i, minutes) in stats.weekly_data.iter().enumerate() {
        let day = today - Duration::days((WEEK_DAYS - 1 - i) as i64);
        let width = (*minutes * 30 / peak) as usize;
        println!("{} {:>4} min {}", day.format("%a"), minutes, "#".repeat(width));
    }
}
