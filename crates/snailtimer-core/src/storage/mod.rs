mod config;
pub mod database;
mod record;

pub use config::{ApiConfig, Config, NotificationsConfig, TimerConfig};
pub use database::Database;
pub use record::{MemoryStore, NewSessionRecord, SessionKind, SessionRecord, SessionStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `SNAILTIMER_DATA_DIR` wins when set. Otherwise `~/.config/snailtimer`,
/// or `~/.config/snailtimer-dev` when `SNAILTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SNAILTIMER_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SNAILTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("snailtimer-dev")
            } else {
                base_dir.join("snailtimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
